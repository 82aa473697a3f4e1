//! Storage layer for the rollover ledger
//!
//! The ledger lives in a workbook: named tables of rows plus named
//! single-column ranges. Business logic talks to the workbook only through
//! the [`TabularStore`] trait; [`Workbook`] is the JSON-file implementation.

pub mod file_io;
pub mod row;
pub mod tables;
pub mod workbook;

pub use file_io::{read_json_required, write_json_atomic};
pub use row::Row;
pub use tables::{read_all, TableRow};
pub use workbook::{NamedRange, Workbook};

use crate::error::RolloverResult;

/// Ordered row storage with named tables and named ranges
///
/// Every call is atomic on its own; there are no multi-call transactions.
/// Implementations must never reorder or remove rows, because callers locate
/// a row by scanning and then address it by index.
pub trait TabularStore: Send + Sync {
    /// Read every row of a table, in storage order
    fn read_table(&self, table: &str) -> RolloverResult<Vec<Row>>;

    /// Read the distinct, non-empty values of a named single-column range
    fn read_named_values(&self, name: &str) -> RolloverResult<Vec<String>>;

    /// Append a row to the end of a table
    fn append_row(&self, table: &str, row: Row) -> RolloverResult<()>;

    /// Overwrite the given columns of the row at `index`
    ///
    /// Fails if `index` is out of range.
    fn update_row(&self, table: &str, index: usize, row: Row) -> RolloverResult<()>;
}
