//! Core logic for the charlist character browser.
//! This crate is the single source of truth for overlay persistence and the
//! derived list view.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod model;
pub mod params;
pub mod service;
pub mod session;
pub mod storage;
pub mod view;

pub use catalog::{
    CatalogError, CatalogFilter, CatalogProvider, CatalogResult, FetchState, FetchTracker,
    RequestTicket, StaticCatalog,
};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::character::{Character, CharacterId, EpisodeRef, PlaceRef};
pub use model::comment::{Comment, CommentId};
pub use model::overlay::OverlayState;
pub use params::{
    FilterSelection, GroupFilter, ParameterState, ParameterStore, SearchSync, SortOrder,
    DEFAULT_SEARCH_DEBOUNCE,
};
pub use service::overlay_service::OverlayStore;
pub use service::welcome_service::WelcomeFlag;
pub use session::Session;
pub use storage::{
    open_store, open_store_in_memory, MemorySlot, PersistencePort, SqliteKeyValueStore,
    SqliteSlot, StorageError, StorageResult,
};
pub use view::pipeline::{build_view, resolve_view, CharacterView, EmptyState, ViewOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
