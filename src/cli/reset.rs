//! Reset CLI command
//!
//! The host trigger for the rollover engine: recompute the chain from a
//! starting month up to the current month and print the outcome.

use clap::Args;
use tracing::info;

use crate::config::settings::Settings;
use crate::error::RolloverResult;
use crate::models::{MonthPeriod, MAX_YEAR, MIN_YEAR};
use crate::services::{ResetOptions, ResetReport, RolloverEngine};
use crate::storage::TabularStore;

use super::expense_filter;

/// Arguments of `rollover reset`
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Month to start from (1-12)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    /// Year to start from
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(i32).range(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR))
    )]
    pub year: i32,

    /// Expense category to reset, or "all"
    #[arg(short, long)]
    pub expense: Option<String>,

    /// Override the month limit from the settings
    #[arg(long)]
    pub max_months: Option<u32>,

    /// Reset categories one at a time
    #[arg(long)]
    pub sequential: bool,
}

impl ResetArgs {
    fn options(&self, settings: &Settings) -> ResetOptions {
        let mut options = ResetOptions::from(settings);
        if let Some(max_months) = self.max_months {
            options.max_months = max_months.max(1);
        }
        if self.sequential {
            options.max_workers = 1;
        }
        options
    }
}

/// Handle `rollover reset`
///
/// Category failures are printed with the report; only a failure that stops
/// the run from starting is returned as an error.
pub fn handle_reset_command(
    store: &dyn TabularStore,
    settings: &Settings,
    args: ResetArgs,
) -> RolloverResult<ResetReport> {
    let start = MonthPeriod::new(args.year, args.month)?;
    let current = MonthPeriod::current();
    let engine = RolloverEngine::with_options(store, args.options(settings));

    let report = engine.reset_rollover(start, expense_filter(args.expense.as_deref()), current)?;
    info!(status = %report.status_line(), "Reset finished");

    print!("{}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{add_expense, rollover_rows};
    use crate::storage::Workbook;

    fn args(month: u32, year: i32, expense: Option<&str>) -> ResetArgs {
        ResetArgs {
            month,
            year,
            expense: expense.map(String::from),
            max_months: None,
            sequential: false,
        }
    }

    #[derive(clap::Parser)]
    struct TestCli {
        #[command(flatten)]
        reset: ResetArgs,
    }

    #[test]
    fn test_year_bounds() {
        use clap::Parser;

        let parse = |year: &str| {
            TestCli::try_parse_from(["rollover", "--month", "1", "--year", year])
                .map(|cli| cli.reset.year)
        };
        assert_eq!(parse("2024").unwrap(), 2024);
        assert!(parse("0").is_err());
        assert!(parse("10000").is_err());
        let negative = TestCli::try_parse_from(["rollover", "--month", "1", "--year=-2147483648"]);
        assert!(negative.is_err());
    }

    #[test]
    fn test_out_of_range_year_rejected_before_reset() {
        let workbook = Workbook::with_standard_layout();
        add_expense(&workbook, "Groceries", 500.0, 600.0);

        let err = handle_reset_command(
            &workbook,
            &Settings::default(),
            args(1, i32::MIN, Some("Groceries")),
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(workbook.revision(), 1);
    }

    #[test]
    fn test_options_overrides() {
        let settings = Settings::default();
        let mut args = args(1, 2024, None);
        assert_eq!(args.options(&settings), ResetOptions::from(&settings));

        args.max_months = Some(0);
        args.sequential = true;
        let options = args.options(&settings);
        assert_eq!(options.max_months, 1);
        assert_eq!(options.max_workers, 1);
    }

    #[test]
    fn test_reset_all_categories() {
        let workbook = Workbook::with_standard_layout();
        add_expense(&workbook, "Groceries", 500.0, 600.0);
        add_expense(&workbook, "Dining", 0.0, 150.0);

        let current = MonthPeriod::current();
        let start = current.prev();
        let report = handle_reset_command(
            &workbook,
            &Settings::default(),
            args(start.month, start.year, Some("all")),
        )
        .unwrap();

        assert!(report.is_success());
        assert_eq!(report.results.len(), 2);
        assert!(rollover_rows(&workbook)
            .iter()
            .any(|e| e.expense == "Dining" && e.period == current));
    }

    #[test]
    fn test_future_start_is_reported_not_raised() {
        let workbook = Workbook::with_standard_layout();
        add_expense(&workbook, "Groceries", 500.0, 600.0);

        let future = MonthPeriod::current().next();
        let report = handle_reset_command(
            &workbook,
            &Settings::default(),
            args(future.month, future.year, Some("Groceries")),
        )
        .unwrap();

        assert!(!report.is_success());
        assert_eq!(workbook.revision(), 1);
    }
}
