//! Day calendar for the economy clock
//!
//! One tick is one simulated day. Months are a flat 30 days and years
//! 12 months, which is all the reporting layer needs.

use serde::{Deserialize, Serialize};

use crate::core::types::Day;

pub const DAYS_PER_MONTH: u64 = 30;
pub const MONTHS_PER_YEAR: u64 = 12;
pub const DAYS_PER_YEAR: u64 = DAYS_PER_MONTH * MONTHS_PER_YEAR;

/// Calendar tracks elapsed simulated days
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Calendar {
    day: Day,
}

/// Human-readable breakdown of a day number (all fields 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: u64,
    pub month: u64,
    pub day_of_month: u64,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.day += 1;
    }

    /// Days elapsed; day 1 is the first simulated day
    pub fn current_day(&self) -> Day {
        self.day
    }

    pub fn date(&self) -> CalendarDate {
        // Day 0 (nothing simulated yet) shares the first calendar date with day 1
        let zero_based = self.day.saturating_sub(1);
        CalendarDate {
            year: zero_based / DAYS_PER_YEAR + 1,
            month: (zero_based % DAYS_PER_YEAR) / DAYS_PER_MONTH + 1,
            day_of_month: zero_based % DAYS_PER_MONTH + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_advances() {
        let mut cal = Calendar::new();
        assert_eq!(cal.current_day(), 0);
        cal.advance();
        assert_eq!(cal.current_day(), 1);
        assert_eq!(
            cal.date(),
            CalendarDate { year: 1, month: 1, day_of_month: 1 }
        );
    }

    #[test]
    fn test_calendar_month_and_year_rollover() {
        let mut cal = Calendar::new();
        for _ in 0..31 {
            cal.advance();
        }
        assert_eq!(
            cal.date(),
            CalendarDate { year: 1, month: 2, day_of_month: 1 }
        );

        for _ in 31..361 {
            cal.advance();
        }
        assert_eq!(cal.current_day(), 361);
        assert_eq!(
            cal.date(),
            CalendarDate { year: 2, month: 1, day_of_month: 1 }
        );
    }
}
