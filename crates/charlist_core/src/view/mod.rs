//! Derived list view over catalog data, overlay state and parameters.
//!
//! # Responsibility
//! - Turn one catalog response plus the current overlay and parameters into
//!   the exact grouped list shown to the user.
//!
//! # Invariants
//! - The pipeline is a pure function of its inputs; callers re-run it on any
//!   input change and nothing is cached between runs.
//! - Hidden characters never appear in any output.

pub mod collate;
pub mod pipeline;
