//! Remote catalog collaborator contract.
//!
//! # Responsibility
//! - Define the server-side filter handed to the catalog provider.
//! - Track in-flight fetches so stale responses never reach the view.
//! - Provide an in-memory provider with the remote filter semantics.
//!
//! # Invariants
//! - `CatalogFilter` equality is the parameter fingerprint used to match a
//!   response to the parameters that requested it.

use crate::model::character::Character;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod fetch_tracker;
mod static_catalog;

pub use fetch_tracker::{FetchState, FetchTracker, RequestTicket};
pub use static_catalog::StaticCatalog;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Provider could not be reached or answered with a transport error.
    Unavailable(String),
    /// Provider answered with a payload that is not a character list.
    InvalidData(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "catalog unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid catalog data: {message}"),
        }
    }
}

impl Error for CatalogError {}

/// Server-side filter; `None` means "no constraint".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl CatalogFilter {
    /// Returns whether `character` satisfies every constraint.
    ///
    /// Name is a case-insensitive substring match; status, species and
    /// gender are case-insensitive exact matches.
    pub fn matches(&self, character: &Character) -> bool {
        let name_ok = self.name.as_deref().map_or(true, |needle| {
            character
                .name
                .to_lowercase()
                .contains(needle.to_lowercase().as_str())
        });

        name_ok
            && exact_ci(self.status.as_deref(), &character.status)
            && exact_ci(self.species.as_deref(), &character.species)
            && exact_ci(self.gender.as_deref(), &character.gender)
    }
}

fn exact_ci(expected: Option<&str>, actual: &str) -> bool {
    expected.map_or(true, |expected| expected.to_lowercase() == actual.to_lowercase())
}

/// Remote catalog provider.
pub trait CatalogProvider {
    fn fetch(&self, filter: &CatalogFilter) -> CatalogResult<Vec<Character>>;
}
