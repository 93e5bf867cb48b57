//! Calendar Clock Seam
//!
//! The quota window is a calendar day, so "today" must be computed at the
//! moment of each read. The trait exists so tests can advance the day
//! without waiting for midnight.

use chrono::{NaiveDate, Utc};

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    /// Current calendar date at the moment of the call
    fn today(&self) -> NaiveDate;
}

/// System clock using the UTC calendar date
///
/// UTC keeps the reset boundary stable regardless of the device timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Settable clock for tests
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: std::sync::Arc<std::sync::Mutex<NaiveDate>>,
}

impl FixedClock {
    /// Create a clock pinned to the given day
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: std::sync::Arc::new(std::sync::Mutex::new(today)),
        }
    }

    /// Move the clock to a different day
    pub fn set_today(&self, today: NaiveDate) {
        *self.today.lock().unwrap() = today;
    }

    /// Advance the clock by the given number of days
    pub fn advance_days(&self, days: u64) {
        let mut current = self.today.lock().unwrap();
        *current = *current + chrono::Duration::days(days as i64);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_today() {
        let clock = SystemClock;
        assert_eq!(clock.today(), Utc::now().date_naive());
    }

    #[test]
    fn test_fixed_clock_set_and_advance() {
        let start = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.today(), start);

        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 8, 26).unwrap());

        clock.set_today(start);
        assert_eq!(clock.today(), start);
    }
}
