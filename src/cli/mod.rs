//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod ledger;
pub mod reference;
pub mod reset;

pub use ledger::{
    handle_budget_command, handle_export_command, handle_rollovers_command, BudgetArgs,
    ExportArgs, RolloversArgs,
};
pub use reference::{handle_reference_command, ReferenceCommands};
pub use reset::{handle_reset_command, ResetArgs};

use crate::error::RolloverResult;
use crate::models::MonthPeriod;

/// Build a month from optional `--month`/`--year` flags, defaulting to the current month
pub(crate) fn period_from_args(
    month: Option<u32>,
    year: Option<i32>,
) -> RolloverResult<MonthPeriod> {
    let current = MonthPeriod::current();
    MonthPeriod::new(year.unwrap_or(current.year), month.unwrap_or(current.month))
}

/// `--expense all` selects every category
pub(crate) fn expense_filter(expense: Option<&str>) -> Option<&str> {
    expense.filter(|e| !e.eq_ignore_ascii_case("all"))
}
