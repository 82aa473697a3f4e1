//! Transaction model
//!
//! An imported bank transaction, already classified into an expense
//! category. Transactions are owned by the workbook and are read-only here.

use super::money::Money;
use super::period::MonthPeriod;

/// A financial transaction from the `Transactions` table
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Import identifier, when the workbook carries one
    pub id: Option<String>,

    /// Month the transaction is booked in
    pub period: MonthPeriod,

    /// Expense category name
    pub expense: String,

    /// Signed amount (negative for spending)
    pub amount: Money,
    pub description: String,

    /// Account number the transaction was imported from
    pub account: Option<String>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(period: MonthPeriod, expense: impl Into<String>, amount: Money) -> Self {
        Self {
            id: None,
            period,
            expense: expense.into(),
            amount,
            description: String::new(),
            account: None,
        }
    }

    /// Check whether this transaction belongs to a category in a month
    pub fn matches(&self, expense: &str, period: &MonthPeriod) -> bool {
        self.period == *period && self.expense == expense
    }
}
