//! Service layer for the rollover ledger
//!
//! The service layer provides business logic on top of the tabular store:
//! transaction totals, budget resolution, the ledger repository and the
//! rollover reset engine.

pub mod budget;
pub mod lookup;
pub mod reset;
pub mod rollover;
pub mod transaction;

#[cfg(test)]
pub(crate) mod testing;

pub use budget::BudgetService;
pub use lookup::LookupService;
pub use reset::{CategoryReset, ResetOptions, ResetReport, RolloverEngine};
pub use rollover::RolloverService;
pub use transaction::TransactionService;
