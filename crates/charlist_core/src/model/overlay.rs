//! Persisted overlay aggregate.
//!
//! # Responsibility
//! - Hold favorite/hidden membership and per-character comment threads.
//! - Define the stored JSON document shape and its lenient loader.
//!
//! # Invariants
//! - `favorites` and `hidden` never contain duplicates; insertion order is
//!   kept only so documents round-trip without reordering.
//! - Thread order is insertion order; edits keep position.
//! - Comment ids are unique across all threads.
//! - A character without comments has no entry in `comments`.

use crate::model::character::CharacterId;
use crate::model::comment::{Comment, CommentId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayState {
    #[serde(default)]
    favorites: Vec<CharacterId>,
    /// Older documents used `hiddenCharacters` or `deletedCharacters`.
    #[serde(default, alias = "hiddenCharacters", alias = "deletedCharacters")]
    hidden: Vec<CharacterId>,
    #[serde(default)]
    comments: BTreeMap<CharacterId, Vec<Comment>>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stored document and repairs duplicate entries.
    ///
    /// Missing fields default to empty. Duplicate set members and comments
    /// repeating an earlier comment id are dropped, keeping the first one.
    pub fn from_json(value: &str) -> serde_json::Result<Self> {
        let mut state: Self = serde_json::from_str(value)?;
        state.normalize();
        Ok(state)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn favorites(&self) -> &[CharacterId] {
        &self.favorites
    }

    pub fn hidden(&self) -> &[CharacterId] {
        &self.hidden
    }

    pub fn comments(&self) -> &BTreeMap<CharacterId, Vec<Comment>> {
        &self.comments
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|favorite| favorite == id)
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.iter().any(|hidden| hidden == id)
    }

    /// Returns the thread for `id`; an unknown id yields an empty slice.
    pub fn comments_for(&self, id: &str) -> &[Comment] {
        self.comments.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_comment_id(&self, comment_id: &str) -> bool {
        self.comments
            .values()
            .flatten()
            .any(|comment| comment.id == comment_id)
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.hidden.is_empty() && self.comments.is_empty()
    }

    /// Flips favorite membership and returns the new membership.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        if let Some(index) = self.favorites.iter().position(|favorite| favorite == id) {
            self.favorites.remove(index);
            false
        } else {
            self.favorites.push(id.to_string());
            true
        }
    }

    /// Returns `false` when `id` was already hidden.
    pub fn insert_hidden(&mut self, id: &str) -> bool {
        if self.is_hidden(id) {
            return false;
        }
        self.hidden.push(id.to_string());
        true
    }

    /// Returns `false` when `id` was not hidden.
    pub fn remove_hidden(&mut self, id: &str) -> bool {
        let before = self.hidden.len();
        self.hidden.retain(|hidden| hidden != id);
        self.hidden.len() != before
    }

    /// Appends `comment` to the thread of `id`, creating the thread if needed.
    pub fn push_comment(&mut self, id: &str, comment: Comment) {
        self.comments.entry(id.to_string()).or_default().push(comment);
    }

    /// Replaces the text of one comment in place.
    ///
    /// Returns `false` when the comment does not exist in the thread of `id`.
    pub fn set_comment_text(&mut self, id: &str, comment_id: &str, text: &str) -> bool {
        let Some(comment) = self
            .comments
            .get_mut(id)
            .and_then(|thread| thread.iter_mut().find(|comment| comment.id == comment_id))
        else {
            return false;
        };
        comment.text = text.to_string();
        true
    }

    /// Removes exactly one comment; the thread entry is dropped once empty.
    pub fn remove_comment(&mut self, id: &str, comment_id: &str) -> Option<Comment> {
        let thread = self.comments.get_mut(id)?;
        let index = thread.iter().position(|comment| comment.id == comment_id)?;
        let removed = thread.remove(index);
        if thread.is_empty() {
            self.comments.remove(id);
        }
        Some(removed)
    }

    fn normalize(&mut self) {
        dedup_in_order(&mut self.favorites);
        dedup_in_order(&mut self.hidden);

        let mut seen: HashSet<CommentId> = HashSet::new();
        for thread in self.comments.values_mut() {
            thread.retain(|comment| seen.insert(comment.id.clone()));
        }
        self.comments.retain(|_, thread| !thread.is_empty());
    }
}

fn dedup_in_order(ids: &mut Vec<CharacterId>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}
