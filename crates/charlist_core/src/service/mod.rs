//! Core use-case services.
//!
//! # Responsibility
//! - Wrap persisted user preferences in total, storage-agnostic APIs.
//! - Keep presentation callers decoupled from storage details.

pub mod overlay_service;
pub mod welcome_service;
