//! In-process persistence port.

use super::{PersistencePort, StorageResult};
use std::cell::{Cell, RefCell};

/// Single-value in-memory slot.
///
/// Keeps a write counter so callers can observe flush-on-mutation behavior.
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: RefCell<Option<String>>,
    saves: Cell<usize>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-populated with `value`, as if saved by an earlier session.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(value.into())),
            saves: Cell::new(0),
        }
    }

    /// Returns a copy of the currently stored document.
    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    /// Number of `save` calls since construction.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl PersistencePort for MemorySlot {
    fn load(&self) -> StorageResult<Option<String>> {
        Ok(self.value.borrow().clone())
    }

    fn save(&self, value: &str) -> StorageResult<()> {
        *self.value.borrow_mut() = Some(value.to_string());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
