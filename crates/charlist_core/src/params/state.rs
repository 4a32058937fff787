//! Query parameter values and their query-string form.
//!
//! # Invariants
//! - Status, species and gender are stored trimmed and lowercased; an empty
//!   value is stored as `None` (no constraint).
//! - Unknown `filter`/`sort` values read as the defaults.
//! - Default values are omitted from the query string.

use crate::catalog::CatalogFilter;
use url::form_urlencoded;

pub const NAME_KEY: &str = "name";
pub const STATUS_KEY: &str = "status";
pub const SPECIES_KEY: &str = "species";
pub const GENDER_KEY: &str = "gender";
pub const FILTER_KEY: &str = "filter";
pub const SORT_KEY: &str = "sort";

/// Which favorite partition the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupFilter {
    #[default]
    All,
    Starred,
    Others,
}

impl GroupFilter {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Starred => "starred",
            Self::Others => "others",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "starred" => Some(Self::Starred),
            "others" => Some(Self::Others),
            _ => None,
        }
    }
}

/// Name ordering applied client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Provider order.
    #[default]
    Default,
    Asc,
    Desc,
}

impl SortOrder {
    /// `Default` is represented by the absence of the key (empty string).
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" => Some(Self::Default),
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Values chosen in the filter dialog; everything but the name query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub status: Option<String>,
    pub species: Option<String>,
    pub gender: Option<String>,
    pub group_filter: GroupFilter,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterState {
    pub name_query: String,
    pub status: Option<String>,
    pub species: Option<String>,
    pub gender: Option<String>,
    pub group_filter: GroupFilter,
    pub sort_order: SortOrder,
}

impl ParameterState {
    /// Parses a query string such as `?name=rick&filter=starred`.
    ///
    /// A leading `?` is optional. Repeated keys keep the last value.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                NAME_KEY => state.name_query = value.to_string(),
                STATUS_KEY => state.status = canonical_constraint(value),
                SPECIES_KEY => state.species = canonical_constraint(value),
                GENDER_KEY => state.gender = canonical_constraint(value),
                FILTER_KEY => state.group_filter = GroupFilter::parse(value).unwrap_or_default(),
                SORT_KEY => state.sort_order = SortOrder::parse(value).unwrap_or_default(),
                _ => {}
            }
        }
        state
    }

    /// Non-default parameters as `(key, value)` pairs in a stable key order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.name_query.is_empty() {
            pairs.push((NAME_KEY, self.name_query.clone()));
        }
        for (key, value) in [
            (STATUS_KEY, &self.status),
            (SPECIES_KEY, &self.species),
            (GENDER_KEY, &self.gender),
        ] {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }
        if self.group_filter != GroupFilter::All {
            pairs.push((FILTER_KEY, self.group_filter.as_query_value().to_string()));
        }
        if self.sort_order != SortOrder::Default {
            pairs.push((SORT_KEY, self.sort_order.as_query_value().to_string()));
        }
        pairs
    }

    /// Encodes [`Self::to_pairs`] as a query string without the leading `?`.
    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_pairs())
            .finish()
    }

    /// Server-side filter derived from these parameters.
    pub fn catalog_filter(&self) -> CatalogFilter {
        let name = self.name_query.trim();
        CatalogFilter {
            name: (!name.is_empty()).then(|| name.to_string()),
            status: self.status.clone(),
            species: self.species.clone(),
            gender: self.gender.clone(),
        }
    }

    /// Returns a copy with the dialog values replaced and the name kept.
    pub fn with_selection(&self, selection: FilterSelection) -> Self {
        Self {
            name_query: self.name_query.clone(),
            status: selection.status.as_deref().and_then(canonical_constraint),
            species: selection.species.as_deref().and_then(canonical_constraint),
            gender: selection.gender.as_deref().and_then(canonical_constraint),
            group_filter: selection.group_filter,
            sort_order: selection.sort_order,
        }
    }

    /// Whether anything narrows or reorders the list, including the name query.
    ///
    /// Selects the "no matches" empty state over "no characters".
    pub fn has_active_filters(&self) -> bool {
        self.group_filter != GroupFilter::All
            || self.status.is_some()
            || self.species.is_some()
            || self.gender.is_some()
            || self.sort_order != SortOrder::Default
            || !self.name_query.trim().is_empty()
    }

    /// Number of dialog filters in effect (status, species, gender, group).
    pub fn active_filter_count(&self) -> usize {
        [
            self.status.is_some(),
            self.species.is_some(),
            self.gender.is_some(),
            self.group_filter != GroupFilter::All,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Trims and lowercases a constraint value; blank means no constraint.
pub fn canonical_constraint(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::{GroupFilter, ParameterState, SortOrder};

    #[test]
    fn query_parsing_canonicalizes_values() {
        let state = ParameterState::from_query(
            "?name=Rick+Sanchez&species=Human&status=%20&filter=starred&sort=DESC",
        );

        assert_eq!(state.name_query, "Rick Sanchez");
        assert_eq!(state.species.as_deref(), Some("human"));
        assert_eq!(state.status, None);
        assert_eq!(state.group_filter, GroupFilter::Starred);
        assert_eq!(state.sort_order, SortOrder::Desc);
    }

    #[test]
    fn unknown_filter_and_sort_fall_back_to_defaults() {
        let state = ParameterState::from_query("filter=favorites&sort=random&page=2");
        assert_eq!(state, ParameterState::default());
        assert!(!state.has_active_filters());
    }

    #[test]
    fn to_query_omits_defaults() {
        let mut state = ParameterState::default();
        assert_eq!(state.to_query(), "");

        state.name_query = "morty smith".to_string();
        state.gender = Some("male".to_string());
        state.sort_order = SortOrder::Asc;
        assert_eq!(state.to_query(), "name=morty+smith&gender=male&sort=asc");
        assert_eq!(ParameterState::from_query(&state.to_query()), state);
    }

    #[test]
    fn catalog_filter_drops_blank_name() {
        let state = ParameterState {
            name_query: "   ".to_string(),
            status: Some("dead".to_string()),
            ..ParameterState::default()
        };
        let filter = state.catalog_filter();
        assert_eq!(filter.name, None);
        assert_eq!(filter.status.as_deref(), Some("dead"));
    }

    #[test]
    fn active_filter_count_ignores_name_and_sort() {
        let state = ParameterState {
            name_query: "rick".to_string(),
            species: Some("alien".to_string()),
            group_filter: GroupFilter::Others,
            sort_order: SortOrder::Desc,
            ..ParameterState::default()
        };
        assert_eq!(state.active_filter_count(), 2);
        assert!(state.has_active_filters());
    }
}
