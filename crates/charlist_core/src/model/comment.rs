//! Comment thread entries.
//!
//! # Invariants
//! - `text` is trimmed and non-empty for every comment created or edited here.
//! - `created_at` is set once at creation and never changes.
//! - `id` is unique across all threads of one overlay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment identifier; v4 UUID text for comments created by this crate.
pub type CommentId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    /// Serialized as ISO-8601 (`2024-05-01T12:00:00.000Z` is accepted on load).
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Builds a comment with a fresh UUID.
    ///
    /// Callers are responsible for passing already-normalized text; see
    /// [`normalize_comment_text`].
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), text, created_at)
    }

    pub fn with_id(
        id: impl Into<CommentId>,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            created_at,
        }
    }
}

/// Trims comment input and rejects blank text.
///
/// Returns `None` when nothing but whitespace was entered.
pub fn normalize_comment_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_comment_text, Comment};
    use chrono::{TimeZone, Utc};

    #[test]
    fn normalize_trims_and_rejects_blank() {
        assert_eq!(normalize_comment_text("  hi there \n"), Some("hi there"));
        assert_eq!(normalize_comment_text(" \t\n"), None);
        assert_eq!(normalize_comment_text(""), None);
    }

    #[test]
    fn comment_serializes_created_at_as_camel_case_iso_string() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let comment = Comment::with_id("c-1", "wubba lubba", created_at);

        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["id"], "c-1");
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn comment_accepts_millisecond_iso_timestamps() {
        let comment: Comment = serde_json::from_str(
            r#"{"id":"c-2","text":"hello","createdAt":"2024-05-01T12:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(
            comment.created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn fresh_comments_get_distinct_ids() {
        let now = Utc::now();
        let first = Comment::new("a", now);
        let second = Comment::new("b", now);
        assert_ne!(first.id, second.id);
    }
}
