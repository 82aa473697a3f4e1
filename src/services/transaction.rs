//! Transaction service
//!
//! Read-only queries over the `Transactions` table: a category's
//! transactions for a month and their signed total.

use tracing::trace;

use crate::error::{RolloverError, RolloverResult};
use crate::models::{Money, MonthPeriod, Transaction};
use crate::storage::{read_all, TabularStore};

/// Service for transaction queries
pub struct TransactionService<'a> {
    store: &'a dyn TabularStore,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(store: &'a dyn TabularStore) -> Self {
        Self { store }
    }

    /// List every transaction in storage order
    pub fn list(&self) -> RolloverResult<Vec<Transaction>> {
        read_all(self.store)
    }

    /// Get the transactions booked to a category in a month
    pub fn transactions_for(
        &self,
        expense: &str,
        period: &MonthPeriod,
    ) -> RolloverResult<Vec<Transaction>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|t| t.matches(expense, period))
            .collect())
    }

    /// Sum the amounts booked to a category in a month
    ///
    /// Returns zero when nothing matches, and an overflow error when the
    /// total does not fit the money type.
    pub fn sum_transactions(&self, expense: &str, period: &MonthPeriod) -> RolloverResult<Money> {
        let transactions = self.transactions_for(expense, period)?;
        let total = Money::checked_sum(transactions.iter().map(|t| t.amount)).ok_or_else(|| {
            RolloverError::Overflow(format!("transactions of {} {}", expense, period))
        })?;

        trace!(
            expense,
            period = %period,
            count = transactions.len(),
            total = %total,
            "Summed transactions"
        );

        Ok(total)
    }
}
