//! Persistence port and its key/value backends.
//!
//! # Responsibility
//! - Define the whole-document load/save contract used by overlay data and
//!   preference flags.
//! - Provide a SQLite-backed store and an in-process store.
//!
//! # Invariants
//! - One port instance is bound to exactly one storage key.
//! - `save` overwrites the whole value; there are no partial writes.
//! - Storage keys are validated before any read or write.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod schema;
mod sqlite_kv;

pub use memory::MemorySlot;
pub use schema::{open_store, open_store_in_memory, schema_version};
pub use sqlite_kv::{SqliteKeyValueStore, SqliteSlot};

static STORAGE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9._-]*$").expect("valid storage key regex"));

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence-layer error surfaced by port implementations.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// Database file was written by a build with a newer schema.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Key does not match `[a-z0-9][a-z0-9._-]*`.
    InvalidKey(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "storage schema version {found} is newer than supported {supported}"
            ),
            Self::InvalidKey(key) => write!(f, "invalid storage key: `{key}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::InvalidKey(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Host-provided storage for one logical preference.
///
/// Mirrors browser local storage semantics: a value is either absent or a
/// complete text document.
pub trait PersistencePort {
    /// Returns the stored document, or `None` when nothing was saved yet.
    fn load(&self) -> StorageResult<Option<String>>;
    /// Replaces the stored document.
    fn save(&self, value: &str) -> StorageResult<()>;
}

impl<P: PersistencePort + ?Sized> PersistencePort for &P {
    fn load(&self) -> StorageResult<Option<String>> {
        (**self).load()
    }

    fn save(&self, value: &str) -> StorageResult<()> {
        (**self).save(value)
    }
}

/// Returns whether `key` is an accepted storage key.
pub fn is_valid_storage_key(key: &str) -> bool {
    STORAGE_KEY_RE.is_match(key)
}

pub(crate) fn validate_storage_key(key: &str) -> StorageResult<()> {
    if is_valid_storage_key(key) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_storage_key;

    #[test]
    fn storage_key_accepts_dotted_lowercase_names() {
        assert!(is_valid_storage_key("charlist.user_interactions"));
        assert!(is_valid_storage_key("welcome-dismissed.v2"));
    }

    #[test]
    fn storage_key_rejects_blank_uppercase_and_spaces() {
        assert!(!is_valid_storage_key(""));
        assert!(!is_valid_storage_key("Charlist"));
        assert!(!is_valid_storage_key("user interactions"));
        assert!(!is_valid_storage_key(".hidden"));
    }
}
