//! Clock port for date-based dynamic variables

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Date-based dynamic variables read the time through this port so that
/// tests can pin it.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
