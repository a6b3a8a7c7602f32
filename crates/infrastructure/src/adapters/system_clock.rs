//! System clock adapter

use chrono::{DateTime, Utc};
use tessera_application::ports::Clock;

/// Clock backed by the system time, used by date-based dynamic variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
