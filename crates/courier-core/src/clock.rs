//! Time source used by command handlers to stamp `EventMetadata::occurred_at`.

use chrono::{DateTime, Utc};

/// Abstraction over system time so produced events are reproducible in tests.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
