//! Stale-response guard for catalog fetches.
//!
//! # Invariants
//! - Only the most recently issued request may update the state.
//! - A response always carries the filter it was requested with, so the view
//!   can compare it against the current parameters.

use super::{CatalogFilter, CatalogResult};
use crate::model::character::Character;
use log::{debug, info};

/// Tri-state (plus idle) view of the latest catalog request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No request has been issued yet.
    #[default]
    Idle,
    Loading {
        filter: CatalogFilter,
    },
    Failed {
        filter: CatalogFilter,
        message: String,
    },
    Ready {
        filter: CatalogFilter,
        characters: Vec<Character>,
    },
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Handle identifying one issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    sequence: u64,
    filter: CatalogFilter,
}

impl RequestTicket {
    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }
}

#[derive(Debug, Default)]
pub struct FetchTracker {
    issued: u64,
    state: FetchState,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Records a new request for `filter`; every older ticket becomes stale.
    pub fn begin(&mut self, filter: CatalogFilter) -> RequestTicket {
        self.issued += 1;
        debug!(
            "event=catalog_request module=catalog status=start sequence={}",
            self.issued
        );
        self.state = FetchState::Loading {
            filter: filter.clone(),
        };
        RequestTicket {
            sequence: self.issued,
            filter,
        }
    }

    /// Applies a response; returns `false` and ignores it when a newer
    /// request was issued after `ticket`.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: CatalogResult<Vec<Character>>,
    ) -> bool {
        if ticket.sequence != self.issued {
            info!(
                "event=catalog_response module=catalog status=stale sequence={} latest={}",
                ticket.sequence, self.issued
            );
            return false;
        }

        self.state = match result {
            Ok(characters) => FetchState::Ready {
                filter: ticket.filter,
                characters,
            },
            Err(err) => FetchState::Failed {
                filter: ticket.filter,
                message: err.to_string(),
            },
        };
        true
    }
}
