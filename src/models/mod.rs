//! Core data models for the rollover ledger
//!
//! This module contains the data structures of the budget workbook:
//! transactions, ledger entries, budget configuration and reference data.

pub mod budget;
pub mod money;
pub mod period;
pub mod reference;
pub mod rollover;
pub mod transaction;

pub use budget::{BudgetOverride, ExpenseBudget};
pub use money::Money;
pub use period::{MonthPeriod, MAX_YEAR, MIN_YEAR};
pub use reference::{Account, MatchingRule};
pub use rollover::{RolloverEntry, RolloverKey};
pub use transaction::Transaction;
