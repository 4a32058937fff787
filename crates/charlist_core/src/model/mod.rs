//! Domain model for the character catalog and the local overlay.
//!
//! # Responsibility
//! - Define the read-only catalog entity shape consumed from the remote provider.
//! - Define the persisted overlay aggregate (favorites, hidden, comments).
//!
//! # Invariants
//! - Characters are identified by their catalog `id`; this crate never mutates them.
//! - Overlay data references character ids without validating them against
//!   the current catalog page.

pub mod character;
pub mod comment;
pub mod overlay;
