//! Budget service
//!
//! Resolves the effective monthly budget of an expense category. A
//! `BudgetHistory` override whose month and year windows both contain the
//! requested month wins; otherwise the category's default `Budget` from
//! `ExpenseData` applies.

use tracing::{debug, warn};

use crate::error::{RolloverError, RolloverResult};
use crate::models::{BudgetOverride, ExpenseBudget, Money, MonthPeriod};
use crate::storage::{read_all, TabularStore};

/// Service for budget lookups
pub struct BudgetService<'a> {
    store: &'a dyn TabularStore,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(store: &'a dyn TabularStore) -> Self {
        Self { store }
    }

    /// List the configured default budgets
    pub fn list(&self) -> RolloverResult<Vec<ExpenseBudget>> {
        read_all(self.store)
    }

    /// Get the `ExpenseData` row for a category
    ///
    /// Fails with a not-found error when the category is not configured.
    pub fn expense_budget(&self, expense: &str) -> RolloverResult<ExpenseBudget> {
        let mut matches = self
            .list()?
            .into_iter()
            .filter(|b| b.expense == expense);

        let first = matches
            .next()
            .ok_or_else(|| RolloverError::expense_not_found(expense))?;

        let extra = matches.count();
        if extra > 0 {
            warn!(
                expense,
                rows = extra + 1,
                "Multiple ExpenseData rows for the same expense, using the first"
            );
        }

        Ok(first)
    }

    /// Get the balance new ledger entries of a category are seeded with
    pub fn initial_amount(&self, expense: &str) -> RolloverResult<Money> {
        Ok(self.expense_budget(expense)?.init)
    }

    /// Get the overrides that apply to a category in a month
    pub fn matching_overrides(
        &self,
        expense: &str,
        period: &MonthPeriod,
    ) -> RolloverResult<Vec<BudgetOverride>> {
        let overrides: Vec<BudgetOverride> = read_all(self.store)?;
        Ok(overrides
            .into_iter()
            .filter(|o| o.applies_to(expense, period))
            .collect())
    }

    /// Resolve the budget for a category
    ///
    /// With a period, a single applicable override takes precedence. Several
    /// applicable overrides are a data inconsistency: a warning is logged and
    /// the default budget is used. Without a period the default budget is
    /// returned directly.
    pub fn resolve_budget(
        &self,
        expense: &str,
        period: Option<&MonthPeriod>,
    ) -> RolloverResult<Money> {
        if let Some(period) = period {
            let overrides = self.matching_overrides(expense, period)?;
            match overrides.as_slice() {
                [single] => {
                    debug!(
                        expense,
                        period = %period,
                        amount = %single.amount,
                        "Using budget override"
                    );
                    return Ok(single.amount);
                }
                [] => {}
                many => {
                    warn!(
                        expense,
                        period = %period,
                        count = many.len(),
                        "Multiple budget overrides apply to the same month, using the default budget"
                    );
                }
            }
        }

        Ok(self.expense_budget(expense)?.budget)
    }
}
