//! Rollover Ledger - month-by-month budget rollover for expense categories
//!
//! Each expense category carries a balance from month to month: the
//! beginning-of-month balance is the previous month's end-of-month balance,
//! and the end-of-month balance adds the month's budget and its (signed)
//! transaction total. The ledger lives in a workbook of named tables.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, months, transactions, ledger entries)
//! - `storage`: The tabular store and its JSON workbook
//! - `services`: Business logic layer, including the reset engine
//! - `export`: CSV export of the ledger
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use rollover_ledger::models::MonthPeriod;
//! use rollover_ledger::services::RolloverEngine;
//! use rollover_ledger::storage::Workbook;
//!
//! let workbook = Workbook::open("workbook.json")?;
//! let start = MonthPeriod::new(2024, 1)?;
//! let report = RolloverEngine::new(&workbook).reset_rollover(start, None, MonthPeriod::current())?;
//! println!("{}", report.status_line());
//! workbook.save()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{RolloverError, RolloverResult};
