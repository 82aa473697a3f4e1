//! Rollover ledger entry model
//!
//! One entry records a category's beginning-of-month balance, the month's
//! signed expense total and the resulting end-of-month balance.

use std::fmt;

use super::money::Money;
use super::period::MonthPeriod;
use crate::error::{RolloverError, RolloverResult};

/// Uniqueness key of a ledger entry: (month, year, expense)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RolloverKey {
    pub period: MonthPeriod,
    pub expense: String,
}

impl RolloverKey {
    pub fn new(period: MonthPeriod, expense: impl Into<String>) -> Self {
        Self {
            period,
            expense: expense.into(),
        }
    }
}

impl fmt::Display for RolloverKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.expense, self.period)
    }
}

/// A month's budget reconciliation record for one expense category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloverEntry {
    pub period: MonthPeriod,
    pub expense: String,

    /// Sum of the month's transaction amounts for the category
    pub expenses: Money,

    /// Beginning-of-month balance
    pub bom: Money,

    /// End-of-month balance
    pub eom: Money,
}

impl RolloverEntry {
    /// Create a freshly seeded entry: both balances start at the category's
    /// initial amount, independent of any predecessor month
    pub fn seeded(
        period: MonthPeriod,
        expense: impl Into<String>,
        expenses: Money,
        initial: Money,
    ) -> Self {
        Self {
            period,
            expense: expense.into(),
            expenses,
            bom: initial,
            eom: initial,
        }
    }

    pub fn key(&self) -> RolloverKey {
        RolloverKey::new(self.period, self.expense.clone())
    }

    /// Check whether this entry has the given key
    pub fn has_key(&self, period: &MonthPeriod, expense: &str) -> bool {
        self.period == *period && self.expense == expense
    }

    /// Recompute this entry from its predecessor
    ///
    /// `BOM = previous EOM` and `EOM = BOM + budget + expenses`. On overflow
    /// the entry is left unchanged.
    pub fn carry_forward(
        &mut self,
        previous_eom: Money,
        budget: Money,
        expenses: Money,
    ) -> RolloverResult<()> {
        let eom = previous_eom
            .checked_add(budget)
            .and_then(|m| m.checked_add(expenses))
            .ok_or_else(|| RolloverError::Overflow(format!("EOM of {}", self.key())))?;

        self.expenses = expenses;
        self.bom = previous_eom;
        self.eom = eom;
        Ok(())
    }
}
