//! CSV Export functionality
//!
//! Exports the rollover ledger, oldest month first within each category.

use std::io::Write;

use crate::error::RolloverResult;
use crate::services::RolloverService;
use crate::storage::TabularStore;

/// Column headers of the ledger export
pub const ROLLOVER_CSV_HEADER: [&str; 6] = ["Month", "Year", "Expense", "Expenses", "BOM", "EOM"];

/// Export ledger entries to CSV, optionally limited to one category
///
/// Returns the number of entries written.
pub fn export_rollovers_csv<W: Write>(
    store: &dyn TabularStore,
    writer: W,
    expense: Option<&str>,
) -> RolloverResult<usize> {
    let mut entries = RolloverService::new(store).list()?;
    if let Some(expense) = expense {
        entries.retain(|e| e.expense == expense);
    }
    entries.sort_by(|a, b| a.expense.cmp(&b.expense).then(a.period.cmp(&b.period)));

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ROLLOVER_CSV_HEADER)?;

    for entry in &entries {
        csv_writer.write_record([
            entry.period.month.to_string(),
            entry.period.year.to_string(),
            entry.expense.clone(),
            format!("{:.2}", entry.expenses.to_f64()),
            format!("{:.2}", entry.bom.to_f64()),
            format!("{:.2}", entry.eom.to_f64()),
        ])?;
    }

    csv_writer.flush()?;
    Ok(entries.len())
}
