//! Runtime configuration for a charlist session.
//!
//! # Invariants
//! - Every field has a default; a config file only overrides what it names.
//! - A loaded config is validated before use.

use crate::logging::default_log_level;
use crate::params::DEFAULT_SEARCH_DEBOUNCE;
use crate::storage::is_valid_storage_key;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DB_FILE_NAME: &str = "charlist.sqlite3";
pub const DEFAULT_OVERLAY_KEY: &str = "charlist.user_interactions";
pub const DEFAULT_WELCOME_KEY: &str = "charlist.welcome_dismissed";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config document: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// SQLite file holding the key/value entries.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub search_debounce_ms: u64,
    pub overlay_key: String,
    pub welcome_key: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE.as_millis() as u64,
            overlay_key: DEFAULT_OVERLAY_KEY.to_string(),
            welcome_key: DEFAULT_WELCOME_KEY.to_string(),
        }
    }
}

impl CoreConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(value: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_debounce_ms == 0 {
            return Err(ConfigError::Invalid(
                "search_debounce_ms must be greater than zero".to_string(),
            ));
        }
        for key in [&self.overlay_key, &self.welcome_key] {
            if !is_valid_storage_key(key) {
                return Err(ConfigError::Invalid(format!("invalid storage key `{key}`")));
            }
        }
        if self.overlay_key == self.welcome_key {
            return Err(ConfigError::Invalid(
                "overlay_key and welcome_key must differ".to_string(),
            ));
        }
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
