//! # Clock
//!
//! Source of "now" for the discount engine.
//!
//! The lead-time rule compares the booking instant against the current
//! instant, so the engine is not pure with respect to wall-clock time. Instead
//! of reading the system clock inside the rule, callers pass a [`Clock`]:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Production:  BookingService ──► SystemClock ──► Local::now()          │
//! │  Tests:       BookingService ──► FixedClock  ──► 2025-07-18 09:00      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Times are venue-local wall time (`NaiveDateTime`), the same frame in
//! which the guest types the date and time into the form.

use chrono::{Local, NaiveDateTime};

/// Something that can tell the current venue-local time.
pub trait Clock: Send + Sync {
    /// Returns the current wall-clock instant.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    /// Creates a clock that always reports `now`.
    pub const fn new(now: NaiveDateTime) -> Self {
        FixedClock(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock_is_frozen() {
        let instant = NaiveDate::from_ymd_opt(2025, 7, 18)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn test_clock_through_arc() {
        let instant = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let clock: std::sync::Arc<dyn Clock> = std::sync::Arc::new(FixedClock::new(instant));
        assert_eq!(clock.now(), instant);
    }
}
