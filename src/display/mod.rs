//! Display formatting for terminal output
//!
//! Formats ledger entries and budget configuration as terminal tables.

pub mod rollover;

pub use rollover::{format_budget_table, format_rollover_table};
