//! Locale-aware name comparison used by client-side sorting.
//!
//! # Invariants
//! - Ordering follows the Unicode root collation at tertiary strength:
//!   punctuation before digits before letters, accents are secondary
//!   differences, and lowercase precedes uppercase on a case-only tie.
//! - The collator is built once per process.

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use log::warn;
use once_cell::sync::Lazy;
use std::cmp::Ordering;

static NAME_COLLATOR: Lazy<Option<CollatorBorrowed<'static>>> = Lazy::new(|| {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            warn!("event=collator_init module=view status=error fallback=codepoint error={err}");
            None
        }
    }
});

/// Compares two display names the way a UI collator does.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    match NAME_COLLATOR.as_ref() {
        Some(collator) => collator.compare(left, right),
        None => left.cmp(right),
    }
}
