//! Export module for the rollover ledger
//!
//! Provides spreadsheet-compatible CSV exports of the ledger.

pub mod csv;

pub use self::csv::{export_rollovers_csv, ROLLOVER_CSV_HEADER};
