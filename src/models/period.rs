//! Calendar month periods
//!
//! Ledger entries, transactions and budget overrides are all keyed by a
//! (month, year) pair. `MonthPeriod` gives that pair an ordering and the
//! month arithmetic the rollover walk needs.

use chrono::Datelike;
use std::fmt;

use crate::error::{RolloverError, RolloverResult};

/// Earliest year a period may fall in
pub const MIN_YEAR: i32 = 1;

/// Latest year a period may fall in
pub const MAX_YEAR: i32 = 9999;

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod {
    // Field order matters: the derived Ord compares year before month.
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    /// Create a period, rejecting months outside 1-12 and years outside
    /// `MIN_YEAR..=MAX_YEAR`
    pub fn new(year: i32, month: u32) -> RolloverResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(RolloverError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(RolloverError::Validation(format!(
                "Year must be between {} and {}, got {}",
                MIN_YEAR, MAX_YEAR, year
            )));
        }
        Ok(Self { year, month })
    }

    /// Get the current month from the local clock
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Get the following month, wrapping December into January of the next year
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the preceding month, wrapping January into December of the prior year
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Number of months from `self` to `other` (negative if `other` is earlier)
    pub fn months_until(&self, other: &Self) -> i64 {
        let from = i64::from(self.year) * 12 + i64::from(self.month);
        let to = i64::from(other.year) * 12 + i64::from(other.month);
        to - from
    }

    /// Step back `count` months
    pub fn minus_months(&self, count: u32) -> Self {
        (0..count).fold(*self, |period, _| period.prev())
    }

    /// Parse a period string such as "2024-01" or "2024-1"
    pub fn parse(s: &str) -> RolloverResult<Self> {
        let invalid =
            || RolloverError::Validation(format!("Invalid period '{}', expected YYYY-MM", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(year: i32, month: u32) -> MonthPeriod {
        MonthPeriod::new(year, month).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(MonthPeriod::new(2024, 0).is_err());
        assert!(MonthPeriod::new(2024, 13).is_err());
        assert!(MonthPeriod::new(2024, 12).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_range_year() {
        assert!(MonthPeriod::new(i32::MIN, 1).unwrap_err().is_validation());
        assert!(MonthPeriod::new(0, 1).is_err());
        assert!(MonthPeriod::new(MAX_YEAR + 1, 1).is_err());

        // Stepping past either bound stays in range of the integer type
        assert_eq!(period(MAX_YEAR, 12).next().year, MAX_YEAR + 1);
        assert_eq!(period(MIN_YEAR, 1).prev().year, MIN_YEAR - 1);
    }

    #[test]
    fn test_navigation_wraps_years() {
        assert_eq!(period(2023, 12).next(), period(2024, 1));
        assert_eq!(period(2024, 1).prev(), period(2023, 12));
        assert_eq!(period(2024, 5).next(), period(2024, 6));
        assert_eq!(period(2024, 5).prev(), period(2024, 4));
    }

    #[test]
    fn test_ordering() {
        assert!(period(2023, 12) < period(2024, 1));
        assert!(period(2024, 2) > period(2024, 1));
    }

    #[test]
    fn test_months_until() {
        assert_eq!(period(2022, 7).months_until(&period(2025, 1)), 30);
        assert_eq!(period(2024, 3).months_until(&period(2024, 1)), -2);
        assert_eq!(period(2024, 1).minus_months(30), period(2021, 7));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(MonthPeriod::parse("2024-01").unwrap(), period(2024, 1));
        assert_eq!(MonthPeriod::parse("2024-3").unwrap(), period(2024, 3));
        assert!(MonthPeriod::parse("2024").is_err());
        assert!(MonthPeriod::parse("2024-13").is_err());
        assert_eq!(period(2024, 3).to_string(), "2024-03");
    }
}
