//! Introductory dialog dismissal flag.
//!
//! The stored value is opaque: any present value means "dismissed".

use crate::storage::PersistencePort;
use log::warn;

const DISMISSED_VALUE: &str = "true";

pub struct WelcomeFlag<P: PersistencePort> {
    port: P,
}

impl<P: PersistencePort> WelcomeFlag<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Returns whether the dialog should be shown on startup.
    ///
    /// Unreadable storage shows the dialog again rather than failing.
    pub fn should_show(&self) -> bool {
        match self.port.load() {
            Ok(value) => value.is_none(),
            Err(err) => {
                warn!("event=welcome_load module=welcome status=fallback error={err}");
                true
            }
        }
    }

    /// Records that the user closed the dialog.
    pub fn dismiss(&self) {
        if let Err(err) = self.port.save(DISMISSED_VALUE) {
            warn!("event=welcome_dismiss module=welcome status=error error={err}");
        }
    }
}
