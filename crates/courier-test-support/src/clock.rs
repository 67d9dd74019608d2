//! Deterministic `Clock` for tests.

use chrono::{DateTime, TimeZone, Utc};
use courier_core::clock::Clock;

/// A clock frozen at one instant.
///
/// `FixedClock::default()` is 2026-01-15T10:00:00Z, the same instant used
/// for the metadata of every `TestEvent`.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// The instant a default `FixedClock` reports.
    #[must_use]
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self(Self::epoch())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
