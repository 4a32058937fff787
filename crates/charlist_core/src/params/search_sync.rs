//! Debounced search-term channel between the text input and the parameter store.
//!
//! # Responsibility
//! - Hold the transient text the user is typing.
//! - Commit it to the parameter store after a quiet period.
//! - Reflect external parameter changes back into the transient text.
//!
//! # Invariants
//! - At most one deadline is armed; each keystroke replaces it.
//! - At most one commit happens per quiet period, and only when the
//!   transient text differs from the store.
//! - Reflecting an external change disarms the deadline, so the reflected
//!   value is never committed back.
//!
//! The host event loop owns the clock: it passes `Instant`s in and calls
//! [`SearchSync::poll`] when [`SearchSync::deadline`] is reached. Dropping
//! the value (component teardown) discards any pending commit.

use super::ParameterStore;
use log::debug;
use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct SearchSync {
    term: String,
    window: Duration,
    deadline: Option<Instant>,
}

impl SearchSync {
    /// Creates a channel seeded with the store's current name query.
    pub fn new(store: &ParameterStore, window: Duration) -> Self {
        Self {
            term: store.name_query().to_string(),
            window,
            deadline: None,
        }
    }

    /// Current transient text (what the input box shows).
    pub fn term(&self) -> &str {
        self.term.as_str()
    }

    /// Time at which [`Self::poll`] will commit, if a commit is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Records a keystroke and restarts the quiet-period countdown.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.term = text.into();
        self.deadline = Some(now + self.window);
    }

    /// Commits the transient text once the quiet period has elapsed.
    ///
    /// Returns the committed value, or `None` when nothing was due or the
    /// store already holds the same text.
    pub fn poll(&mut self, store: &mut ParameterStore, now: Instant) -> Option<String> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;

        if !store.set_name_query(&self.term) {
            debug!("event=search_commit module=search status=noop");
            return None;
        }
        debug!(
            "event=search_commit module=search status=ok chars={}",
            self.term.chars().count()
        );
        Some(self.term.clone())
    }

    /// Pulls an external name change into the transient text.
    ///
    /// Returns `true` when the transient text was replaced.
    pub fn sync_from_store(&mut self, store: &ParameterStore) -> bool {
        let external = store.name_query();
        if self.term == external {
            return false;
        }
        self.term = external.to_string();
        self.deadline = None;
        debug!("event=search_reflect module=search status=ok");
        true
    }

    /// Discards a pending commit without touching the transient text.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchSync, DEFAULT_SEARCH_DEBOUNCE};
    use crate::params::ParameterStore;
    use std::time::{Duration, Instant};

    #[test]
    fn commit_waits_for_full_quiet_period() {
        let mut store = ParameterStore::new();
        let mut sync = SearchSync::new(&store, DEFAULT_SEARCH_DEBOUNCE);
        let t0 = Instant::now();

        sync.input("rick", t0);
        assert_eq!(sync.poll(&mut store, t0 + Duration::from_millis(499)), None);
        assert_eq!(store.name_query(), "");

        assert_eq!(
            sync.poll(&mut store, t0 + Duration::from_millis(500)).as_deref(),
            Some("rick")
        );
        assert!(!sync.is_pending());
    }

    #[test]
    fn unchanged_term_is_not_committed() {
        let mut store = ParameterStore::from_query("name=rick");
        let mut sync = SearchSync::new(&store, DEFAULT_SEARCH_DEBOUNCE);
        let t0 = Instant::now();

        sync.input("rickx", t0);
        sync.input("rick", t0 + Duration::from_millis(50));
        assert_eq!(sync.poll(&mut store, t0 + Duration::from_secs(1)), None);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn cancel_discards_pending_commit() {
        let mut store = ParameterStore::new();
        let mut sync = SearchSync::new(&store, DEFAULT_SEARCH_DEBOUNCE);
        let t0 = Instant::now();

        sync.input("morty", t0);
        sync.cancel();
        assert_eq!(sync.poll(&mut store, t0 + Duration::from_secs(2)), None);
        assert_eq!(sync.term(), "morty");
        assert_eq!(store.name_query(), "");
    }
}
