//! Application session: the composition root handed to presentation code.
//!
//! # Responsibility
//! - Own the overlay store, welcome flag, parameter store, search channel
//!   and catalog fetch state for one application run.
//! - Route user events to the owning component and expose the derived view.
//!
//! # Invariants
//! - There is one session per run; it is created at startup and opened once
//!   with its persistence ports.
//! - Using the overlay or welcome flag before [`Session::open`] is a wiring
//!   bug and panics.

use crate::catalog::{CatalogProvider, FetchState, FetchTracker};
use crate::config::CoreConfig;
use crate::params::{FilterSelection, ParameterStore, SearchSync};
use crate::service::overlay_service::OverlayStore;
use crate::service::welcome_service::WelcomeFlag;
use crate::storage::PersistencePort;
use crate::view::pipeline::{resolve_view, ViewOutcome};
use log::info;
use std::time::Instant;

const NOT_OPENED: &str =
    "session used before Session::open; open it with its persistence ports at startup";

pub struct Session<P: PersistencePort> {
    overlay: Option<OverlayStore<P>>,
    welcome: Option<WelcomeFlag<P>>,
    params: ParameterStore,
    search: SearchSync,
    fetch: FetchTracker,
}

impl<P: PersistencePort> Session<P> {
    /// Creates an unopened session seeded from the launch query string.
    pub fn new(config: &CoreConfig, initial_query: &str) -> Self {
        let params = ParameterStore::from_query(initial_query);
        let search = SearchSync::new(&params, config.search_debounce());
        Self {
            overlay: None,
            welcome: None,
            params,
            search,
            fetch: FetchTracker::new(),
        }
    }

    /// Loads persisted overlay data and attaches the preference ports.
    ///
    /// # Panics
    /// - When called a second time on the same session.
    pub fn open(&mut self, overlay_port: P, welcome_port: P) {
        assert!(self.overlay.is_none(), "Session::open called twice");
        self.overlay = Some(OverlayStore::load(overlay_port));
        self.welcome = Some(WelcomeFlag::new(welcome_port));
        info!("event=session_open module=session status=ok");
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_some()
    }

    /// # Panics
    /// - When the session has not been opened.
    pub fn overlay(&self) -> &OverlayStore<P> {
        self.overlay.as_ref().expect(NOT_OPENED)
    }

    /// # Panics
    /// - When the session has not been opened.
    pub fn overlay_mut(&mut self) -> &mut OverlayStore<P> {
        self.overlay.as_mut().expect(NOT_OPENED)
    }

    /// # Panics
    /// - When the session has not been opened.
    pub fn welcome(&self) -> &WelcomeFlag<P> {
        self.welcome.as_ref().expect(NOT_OPENED)
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub fn search(&self) -> &SearchSync {
        &self.search
    }

    pub fn fetch_state(&self) -> &FetchState {
        self.fetch.state()
    }

    /// Keystroke in the search box.
    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Timer callback; returns `true` when a search term was committed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.search.poll(&mut self.params, now).is_some()
    }

    /// External navigation (back/forward, pasted link).
    pub fn navigate(&mut self, query: &str) -> bool {
        let changed = self.params.navigate(query);
        if changed {
            self.search.sync_from_store(&self.params);
        }
        changed
    }

    pub fn apply_filters(&mut self, selection: FilterSelection) -> bool {
        self.params.apply_filters(selection)
    }

    pub fn clear_filters(&mut self) -> bool {
        self.params.clear_filters()
    }

    /// Fetches the catalog when the current parameters have no loaded or
    /// in-flight response; a failed response is retried.
    ///
    /// Synchronous providers complete within the call; hosts with async
    /// transports drive [`FetchTracker`] directly.
    pub fn refresh<C: CatalogProvider + ?Sized>(&mut self, catalog: &C) {
        let filter = self.params.state().catalog_filter();
        let up_to_date = match self.fetch.state() {
            FetchState::Loading { filter: requested }
            | FetchState::Ready {
                filter: requested, ..
            } => *requested == filter,
            FetchState::Idle | FetchState::Failed { .. } => false,
        };
        if up_to_date {
            return;
        }
        let ticket = self.fetch.begin(filter);
        let result = catalog.fetch(ticket.filter());
        self.fetch.complete(ticket, result);
    }

    /// Derived view for the current inputs.
    ///
    /// # Panics
    /// - When the session has not been opened.
    pub fn view(&self) -> ViewOutcome<'_> {
        resolve_view(self.fetch.state(), self.overlay().state(), self.params.state())
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::config::CoreConfig;
    use crate::storage::MemorySlot;

    #[test]
    #[should_panic(expected = "session used before Session::open")]
    fn overlay_access_before_open_panics() {
        let session: Session<MemorySlot> = Session::new(&CoreConfig::default(), "");
        let _ = session.overlay();
    }

    #[test]
    fn open_loads_overlay() {
        let mut session = Session::new(&CoreConfig::default(), "name=rick");
        session.open(
            MemorySlot::with_value(r#"{"favorites":["1"]}"#),
            MemorySlot::new(),
        );
        assert!(session.is_open());
        assert!(session.overlay().is_favorite("1"));
        assert!(session.welcome().should_show());
        assert_eq!(session.search().term(), "rick");
    }
}
