//! Time sources.
//!
//! Everything that depends on the wall clock (today's date, seed minting,
//! debounce deadlines) reads it through [`Clock`] so tests can pin it.

use std::cell::Cell;

use chrono::{Local, NaiveDate};

/// Date format used for puzzle seeds and persisted records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of the current calendar date and wall-clock milliseconds.
pub trait Clock {
    /// Current local calendar date.
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// The real local clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// A manually driven clock for tests and replays.
#[derive(Clone, Debug)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
    millis: Cell<i64>,
}

impl FixedClock {
    /// Create a clock pinned to the given date and millisecond timestamp.
    pub fn new(today: NaiveDate, millis: i64) -> Self {
        Self {
            today: Cell::new(today),
            millis: Cell::new(millis),
        }
    }

    /// Move the calendar date.
    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Advance wall time.
    pub fn advance_millis(&self, delta: i64) {
        self.millis.set(self.millis.get() + delta);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn now_millis(&self) -> i64 {
        self.millis.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Format a date as `YYYY-MM-DD`.
pub fn date_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date as `YYYY-MM-DD`.
pub fn today_string(clock: &impl Clock) -> String {
    date_string(clock.today())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_string_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(date_string(date), "2024-01-05");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), 1_000);
        assert_eq!(today_string(&clock), "2024-03-09");

        clock.advance_millis(250);
        assert_eq!(clock.now_millis(), 1_250);

        clock.set_today(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(today_string(&clock), "2024-03-10");
    }
}
