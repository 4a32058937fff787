//! Externally addressable list parameters and the debounced search channel.
//!
//! # Responsibility
//! - Own the current `ParameterState` (the URL-like query parameters).
//! - Apply dialog, navigation and search-commit changes as whole-state
//!   replacements.
//!
//! # Invariants
//! - `revision` increases exactly when the state changes.
//! - Snapshots are immutable; each change derives from the latest state.

use log::debug;
use std::sync::Arc;

pub mod search_sync;
pub mod state;

pub use search_sync::{SearchSync, DEFAULT_SEARCH_DEBOUNCE};
pub use state::{FilterSelection, GroupFilter, ParameterState, SortOrder};

#[derive(Debug, Default)]
pub struct ParameterStore {
    state: Arc<ParameterState>,
    revision: u64,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store from an initial query string (e.g. the launch URL).
    pub fn from_query(query: &str) -> Self {
        Self {
            state: Arc::new(ParameterState::from_query(query)),
            revision: 0,
        }
    }

    pub fn state(&self) -> &ParameterState {
        &self.state
    }

    pub fn snapshot(&self) -> Arc<ParameterState> {
        Arc::clone(&self.state)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn name_query(&self) -> &str {
        self.state.name_query.as_str()
    }

    pub fn to_query(&self) -> String {
        self.state.to_query()
    }

    /// Commits a search term; returns `false` when it equals the current one.
    pub fn set_name_query(&mut self, value: &str) -> bool {
        if self.state.name_query == value {
            return false;
        }
        let next = ParameterState {
            name_query: value.to_string(),
            ..ParameterState::clone(&self.state)
        };
        self.replace("set_name_query", next)
    }

    /// Applies the filter dialog selection, keeping the name query.
    pub fn apply_filters(&mut self, selection: FilterSelection) -> bool {
        let next = self.state.with_selection(selection);
        self.replace("apply_filters", next)
    }

    /// Removes status, species, gender, group filter and sort.
    pub fn clear_filters(&mut self) -> bool {
        self.apply_filters(FilterSelection::default())
    }

    /// Replaces the whole state from an external query string
    /// (back/forward navigation, pasted link).
    pub fn navigate(&mut self, query: &str) -> bool {
        self.replace("navigate", ParameterState::from_query(query))
    }

    fn replace(&mut self, op: &'static str, next: ParameterState) -> bool {
        if *self.state == next {
            debug!("event={op} module=params status=noop");
            return false;
        }
        self.state = Arc::new(next);
        self.revision += 1;
        debug!(
            "event={op} module=params status=ok revision={} active_filters={}",
            self.revision,
            self.state.active_filter_count()
        );
        true
    }
}
