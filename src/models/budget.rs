//! Budget reference data
//!
//! `ExpenseBudget` rows hold each category's seed balance and default monthly
//! budget. `BudgetOverride` rows temporarily replace the default for a window
//! of months and years.

use super::money::Money;
use super::period::MonthPeriod;

/// Default budget configuration for one expense category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseBudget {
    pub expense: String,

    /// Initial balance used to seed new ledger entries
    pub init: Money,

    /// Default monthly budget
    pub budget: Money,
}

impl ExpenseBudget {
    pub fn new(expense: impl Into<String>, init: Money, budget: Money) -> Self {
        Self {
            expense: expense.into(),
            init,
            budget,
        }
    }
}

/// A time-bounded replacement for a category's default budget
///
/// The month window and the year window are checked independently. A row
/// with months 11-2 therefore never matches anything, and a row with months
/// 1-3 and years 2023-2024 matches March 2024 and January 2023 alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetOverride {
    pub expense: String,
    pub amount: Money,
    pub month_start: u32,
    pub month_end: u32,
    pub year_start: i32,
    pub year_end: i32,
}

impl BudgetOverride {
    /// Check whether this override applies to a category in a month
    pub fn applies_to(&self, expense: &str, period: &MonthPeriod) -> bool {
        self.expense == expense
            && self.month_window_contains(period.month)
            && self.year_window_contains(period.year)
    }

    pub fn month_window_contains(&self, month: u32) -> bool {
        self.month_start <= month && month <= self.month_end
    }

    pub fn year_window_contains(&self, year: i32) -> bool {
        self.year_start <= year && year <= self.year_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groceries_override(months: (u32, u32), years: (i32, i32)) -> BudgetOverride {
        BudgetOverride {
            expense: "Groceries".into(),
            amount: Money::from_cents(70000),
            month_start: months.0,
            month_end: months.1,
            year_start: years.0,
            year_end: years.1,
        }
    }

    #[test]
    fn test_single_month_window() {
        let o = groceries_override((3, 3), (2024, 2024));
        assert!(o.applies_to("Groceries", &MonthPeriod::new(2024, 3).unwrap()));
        assert!(!o.applies_to("Groceries", &MonthPeriod::new(2024, 4).unwrap()));
        assert!(!o.applies_to("Dining", &MonthPeriod::new(2024, 3).unwrap()));
    }

    #[test]
    fn test_windows_are_independent() {
        let o = groceries_override((1, 3), (2023, 2024));
        // Not a continuous date range: every year gets months 1-3 only.
        assert!(o.applies_to("Groceries", &MonthPeriod::new(2023, 2).unwrap()));
        assert!(!o.applies_to("Groceries", &MonthPeriod::new(2023, 11).unwrap()));
        assert!(o.applies_to("Groceries", &MonthPeriod::new(2024, 1).unwrap()));
    }

    #[test]
    fn test_wrapping_month_window_never_matches() {
        let o = groceries_override((11, 2), (2023, 2024));
        for month in 1..=12 {
            assert!(!o.applies_to("Groceries", &MonthPeriod::new(2024, month).unwrap()));
        }
    }
}
