//! Grouped list computation.
//!
//! Steps, in order: drop hidden ids, sort by name (stable; provider order
//! for `SortOrder::Default`), partition into starred/others, apply the group
//! filter. The name query is applied server-side and not repeated here.

use super::collate::compare_names;
use crate::catalog::FetchState;
use crate::model::character::Character;
use crate::model::overlay::OverlayState;
use crate::params::{GroupFilter, ParameterState, SortOrder};

/// Which empty-list message to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing to show and no filter is active.
    NoCharacters,
    /// Characters may exist but the active filters exclude all of them.
    NoMatches,
}

/// Displayable list split into starred and other characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterView<'a> {
    pub starred: Vec<&'a Character>,
    pub others: Vec<&'a Character>,
}

impl<'a> CharacterView<'a> {
    /// Combined count for "N results" reporting.
    pub fn total(&self) -> usize {
        self.starred.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Starred characters first, then the rest.
    pub fn iter(&self) -> impl Iterator<Item = &'a Character> + '_ {
        self.starred.iter().chain(self.others.iter()).copied()
    }

    pub fn empty_state(&self, params: &ParameterState) -> Option<EmptyState> {
        if !self.is_empty() {
            return None;
        }
        if params.has_active_filters() {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoCharacters)
        }
    }
}

/// Builds the grouped view for one catalog response.
pub fn build_view<'a>(
    characters: &'a [Character],
    overlay: &OverlayState,
    params: &ParameterState,
) -> CharacterView<'a> {
    let mut visible: Vec<&Character> = characters
        .iter()
        .filter(|character| !overlay.is_hidden(&character.id))
        .collect();

    match params.sort_order {
        SortOrder::Default => {}
        SortOrder::Asc => visible.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortOrder::Desc => visible.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }

    let (starred, others): (Vec<&Character>, Vec<&Character>) = visible
        .into_iter()
        .partition(|character| overlay.is_favorite(&character.id));

    match params.group_filter {
        GroupFilter::All => CharacterView { starred, others },
        GroupFilter::Starred => CharacterView {
            starred,
            others: Vec::new(),
        },
        GroupFilter::Others => CharacterView {
            starred: Vec::new(),
            others,
        },
    }
}

/// Result of combining the catalog fetch state with the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome<'a> {
    /// No response for the current parameters yet.
    Pending,
    Failed(&'a str),
    Ready(CharacterView<'a>),
}

/// Runs the pipeline only on a response whose filter matches `params`.
///
/// A ready response requested with other parameters is treated as pending.
pub fn resolve_view<'a>(
    fetch: &'a FetchState,
    overlay: &OverlayState,
    params: &ParameterState,
) -> ViewOutcome<'a> {
    let current = params.catalog_filter();
    match fetch {
        FetchState::Ready { filter, characters } if *filter == current => {
            ViewOutcome::Ready(build_view(characters, overlay, params))
        }
        FetchState::Failed { filter, message } if *filter == current => {
            ViewOutcome::Failed(message.as_str())
        }
        _ => ViewOutcome::Pending,
    }
}
