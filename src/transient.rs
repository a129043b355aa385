//! A status message that shows up when a newer signal arrives and hides
//! itself after a fixed lifetime.

use crate::constants::TRANSIENT_MESSAGE_MS;
use crate::signal::{Receiver, Signal};

#[derive(Debug, Clone)]
pub struct TransientMessageBox {
    contents: Receiver<String>,
    lifetime_ms: i64,
    remaining_ms: i64,
}

impl Default for TransientMessageBox {
    fn default() -> Self {
        Self::new(TRANSIENT_MESSAGE_MS)
    }
}

impl TransientMessageBox {
    pub fn new(lifetime_ms: i64) -> Self {
        Self {
            contents: Receiver::new(),
            lifetime_ms,
            remaining_ms: 0,
        }
    }

    /// Show `message` if it is newer than what was last shown. Re-delivering
    /// the same signal does not restart the countdown.
    pub fn receive(&mut self, message: &Signal<String>) {
        let lifetime = self.lifetime_ms;
        let remaining = &mut self.remaining_ms;
        self.contents.if_newer(message, |_| *remaining = lifetime);
    }

    /// Advance the countdown by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: i64) {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
    }

    pub fn text(&self) -> Option<&str> {
        if self.remaining_ms <= 0 {
            return None;
        }
        self.contents.current().value().map(String::as_str)
    }

    pub fn can_dismiss(&self) -> bool {
        self.text().is_some()
    }

    pub fn dismiss(&mut self) {
        self.remaining_ms = 0;
    }
}
