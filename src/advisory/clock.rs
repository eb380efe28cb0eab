//! Sources of the current local time.

use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Supplies the current wall-clock time in the business time zone.
pub trait Clock: Send + Sync {
    /// Returns the local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The system clock, viewed from a fixed IANA time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    /// Creates a clock for `tz`.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// A clock stopped at a given moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
