//! Overlay store use-case service.
//!
//! # Responsibility
//! - Own the session's overlay snapshot (favorites, hidden, comments).
//! - Apply user mutations and flush the full document through the
//!   persistence port before returning.
//!
//! # Invariants
//! - Every operation is total: invalid input is a logged no-op, storage
//!   failures are logged and never surfaced to callers.
//! - Each effective mutation installs a new immutable snapshot derived from
//!   the latest one; snapshots handed out earlier are never changed.
//! - No-op calls do not write to storage.
//! - Log events carry ids and counts only, never comment text.

use crate::model::character::CharacterId;
use crate::model::comment::{normalize_comment_text, Comment, CommentId};
use crate::model::overlay::OverlayState;
use crate::storage::PersistencePort;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Session-scoped overlay store over one persistence port.
pub struct OverlayStore<P: PersistencePort> {
    port: P,
    state: Arc<OverlayState>,
}

impl<P: PersistencePort> OverlayStore<P> {
    /// Loads prior state from `port`, falling back to the empty default.
    ///
    /// Absent, unreadable or unparsable data is treated as "no prior state".
    pub fn load(port: P) -> Self {
        let state = match port.load() {
            Ok(Some(raw)) => match OverlayState::from_json(&raw) {
                Ok(state) => {
                    info!(
                        "event=overlay_load module=overlay status=ok favorites={} hidden={} threads={}",
                        state.favorites().len(),
                        state.hidden().len(),
                        state.comments().len()
                    );
                    state
                }
                Err(err) => {
                    warn!(
                        "event=overlay_load module=overlay status=fallback reason=corrupt bytes={} error={}",
                        raw.len(),
                        err
                    );
                    OverlayState::default()
                }
            },
            Ok(None) => {
                info!("event=overlay_load module=overlay status=fallback reason=absent");
                OverlayState::default()
            }
            Err(err) => {
                warn!(
                    "event=overlay_load module=overlay status=fallback reason=unreadable error={}",
                    err
                );
                OverlayState::default()
            }
        };

        Self {
            port,
            state: Arc::new(state),
        }
    }

    /// Returns the current immutable snapshot.
    pub fn snapshot(&self) -> Arc<OverlayState> {
        Arc::clone(&self.state)
    }

    /// Borrows the current state without bumping the snapshot refcount.
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.is_favorite(id)
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.state.is_hidden(id)
    }

    pub fn comments_for(&self, id: &str) -> &[Comment] {
        self.state.comments_for(id)
    }

    pub fn comment_count(&self, id: &str) -> usize {
        self.state.comments_for(id).len()
    }

    /// Flips favorite membership of `id`; returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let mut favorite = false;
        self.mutate("toggle_favorite", |state| {
            favorite = state.toggle_favorite(id);
            true
        });
        debug!("event=toggle_favorite module=overlay character_id={id} favorite={favorite}");
        favorite
    }

    /// Hides `id` from every derived view; returns `false` if already hidden.
    pub fn hide_character(&mut self, id: &str) -> bool {
        self.mutate("hide_character", |state| state.insert_hidden(id))
    }

    /// Makes `id` visible again; returns `false` if it was not hidden.
    pub fn unhide_character(&mut self, id: &str) -> bool {
        self.mutate("unhide_character", |state| state.remove_hidden(id))
    }

    /// Appends a comment stamped with the current time.
    ///
    /// Returns the new comment id, or `None` when `text` is blank.
    pub fn add_comment(&mut self, id: &str, text: &str) -> Option<CommentId> {
        self.add_comment_at(id, text, Utc::now())
    }

    /// Same as [`Self::add_comment`] with an explicit creation time.
    pub fn add_comment_at(
        &mut self,
        id: &str,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> Option<CommentId> {
        let Some(text) = normalize_comment_text(text) else {
            debug!(
                "event=add_comment module=overlay status=rejected reason=blank character_id={id}"
            );
            return None;
        };

        let mut comment = Comment::new(text, created_at);
        while self.state.contains_comment_id(&comment.id) {
            comment = Comment::new(text, created_at);
        }
        let comment_id = comment.id.clone();

        self.mutate("add_comment", |state| {
            state.push_comment(id, comment);
            true
        });
        Some(comment_id)
    }

    /// Replaces the text of an existing comment, keeping id, timestamp and position.
    ///
    /// Returns `false` for blank text or an unknown comment id.
    pub fn edit_comment(&mut self, id: &str, comment_id: &str, text: &str) -> bool {
        let Some(text) = normalize_comment_text(text) else {
            debug!(
                "event=edit_comment module=overlay status=rejected reason=blank character_id={id}"
            );
            return false;
        };
        if !self
            .state
            .comments_for(id)
            .iter()
            .any(|comment| comment.id == comment_id)
        {
            debug!(
                "event=edit_comment module=overlay status=rejected reason=not_found character_id={id} comment_id={comment_id}"
            );
            return false;
        }

        self.mutate("edit_comment", |state| {
            state.set_comment_text(id, comment_id, text)
        })
    }

    /// Removes one comment; returns `false` when it does not exist.
    pub fn delete_comment(&mut self, id: &str, comment_id: &str) -> bool {
        self.mutate("delete_comment", |state| {
            state.remove_comment(id, comment_id).is_some()
        })
    }

    /// Drops all overlay data and persists the empty document.
    pub fn reset(&mut self) -> bool {
        self.mutate("reset", |state| {
            if state.is_empty() {
                return false;
            }
            *state = OverlayState::default();
            true
        })
    }

    /// Ids of every favorite, in the order they were starred.
    pub fn favorite_ids(&self) -> Vec<CharacterId> {
        self.state.favorites().to_vec()
    }

    fn mutate(
        &mut self,
        op: &'static str,
        apply: impl FnOnce(&mut OverlayState) -> bool,
    ) -> bool {
        let mut next = OverlayState::clone(&self.state);
        if !apply(&mut next) {
            debug!("event={op} module=overlay status=noop");
            return false;
        }
        self.state = Arc::new(next);
        self.persist(op);
        true
    }

    fn persist(&self, op: &'static str) {
        let document = match self.state.to_json() {
            Ok(document) => document,
            Err(err) => {
                error!(
                    "event=overlay_save module=overlay status=error op={op} error_code=serialize_failed error={err}"
                );
                return;
            }
        };

        match self.port.save(&document) {
            Ok(()) => debug!(
                "event=overlay_save module=overlay status=ok op={op} bytes={}",
                document.len()
            ),
            Err(err) => error!(
                "event=overlay_save module=overlay status=error op={op} error_code=write_failed error={err}"
            ),
        }
    }
}
