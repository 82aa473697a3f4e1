//! Ledger CLI commands
//!
//! Viewing the rollover ledger and the effective budgets, and exporting the
//! ledger to CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::config::paths::RolloverPaths;
use crate::display::{format_budget_table, format_rollover_table};
use crate::error::{RolloverError, RolloverResult};
use crate::export::export_rollovers_csv;
use crate::models::{MonthPeriod, MAX_YEAR, MIN_YEAR};
use crate::services::{BudgetService, RolloverService};
use crate::storage::TabularStore;

use super::{expense_filter, period_from_args};

/// Arguments of `rollover rollovers`
#[derive(Args, Debug, Default)]
pub struct RolloversArgs {
    /// Only show one expense category
    #[arg(short, long)]
    pub expense: Option<String>,

    /// Only show months from this one on (YYYY-MM)
    #[arg(long)]
    pub from: Option<String>,
}

/// Arguments of `rollover budget`
#[derive(Args, Debug, Default)]
pub struct BudgetArgs {
    /// Month to resolve budgets for (defaults to the current month)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Year to resolve budgets for (defaults to the current year)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(i32).range(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR))
    )]
    pub year: Option<i32>,
}

/// Arguments of `rollover export`
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Only export one expense category
    #[arg(short, long)]
    pub expense: Option<String>,

    /// Output file (defaults to rollovers.csv in the export directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `rollover rollovers`
pub fn handle_rollovers_command(
    store: &dyn TabularStore,
    args: RolloversArgs,
) -> RolloverResult<()> {
    let service = RolloverService::new(store);

    let mut entries = match expense_filter(args.expense.as_deref()) {
        Some(expense) => service.list_for_expense(expense)?,
        None => {
            let mut entries = service.list()?;
            entries.sort_by(|a, b| a.expense.cmp(&b.expense).then(a.period.cmp(&b.period)));
            entries
        }
    };

    if let Some(from) = args.from.as_deref() {
        let from = MonthPeriod::parse(from)?;
        entries.retain(|e| e.period >= from);
    }

    println!("{}", format_rollover_table(&entries));
    Ok(())
}

/// Handle `rollover budget`
pub fn handle_budget_command(store: &dyn TabularStore, args: BudgetArgs) -> RolloverResult<()> {
    let period = period_from_args(args.month, args.year)?;
    let service = BudgetService::new(store);

    let budgets = service
        .list()?
        .into_iter()
        .map(|budget| {
            let effective = service.resolve_budget(&budget.expense, Some(&period))?;
            Ok((budget, effective))
        })
        .collect::<RolloverResult<Vec<_>>>()?;

    println!("Budgets for {}", period);
    println!("{}", format_budget_table(&budgets));
    Ok(())
}

/// Handle `rollover export`
pub fn handle_export_command(
    store: &dyn TabularStore,
    paths: &RolloverPaths,
    args: ExportArgs,
) -> RolloverResult<()> {
    let output = match args.output {
        Some(output) => output,
        None => {
            paths.ensure_directories()?;
            paths.export_dir().join("rollovers.csv")
        }
    };

    let file = File::create(&output).map_err(|e| {
        RolloverError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let writer = BufWriter::new(file);

    let count = export_rollovers_csv(store, writer, expense_filter(args.expense.as_deref()))?;
    println!("Exported {} rollover entries to: {}", count, output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{add_expense, add_override, period};
    use crate::storage::Workbook;
    use tempfile::TempDir;

    fn workbook() -> Workbook {
        let workbook = Workbook::with_standard_layout();
        add_expense(&workbook, "Groceries", 500.0, 600.0);
        add_override(&workbook, "Groceries", 700.0, (1, 12), (2020, 2030));
        let service = RolloverService::new(&workbook);
        service.get_or_create(&period(2024, 1), "Groceries").unwrap();
        service.get_or_create(&period(2024, 2), "Groceries").unwrap();
        workbook
    }

    #[test]
    fn test_rollovers_bad_from_is_rejected() {
        let workbook = workbook();
        let args = RolloversArgs {
            expense: None,
            from: Some("2024/02".into()),
        };
        assert!(handle_rollovers_command(&workbook, args).is_err());
    }

    #[test]
    fn test_budget_command_resolves_each_expense() {
        let workbook = workbook();
        let args = BudgetArgs {
            month: Some(6),
            year: Some(2024),
        };
        handle_budget_command(&workbook, args).unwrap();
    }

    #[test]
    fn test_export_to_explicit_file() {
        let workbook = workbook();
        let temp_dir = TempDir::new().unwrap();
        let paths = RolloverPaths::with_base_dir(temp_dir.path().to_path_buf());
        let output = temp_dir.path().join("ledger.csv");

        let args = ExportArgs {
            expense: Some("all".into()),
            output: Some(output.clone()),
        };
        handle_export_command(&workbook, &paths, args).unwrap();

        let contents = std::fs::read_to_string(&output).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.starts_with("Month,Year,Expense,Expenses,BOM,EOM"));
    }

    #[test]
    fn test_export_defaults_to_export_dir() {
        let workbook = workbook();
        let temp_dir = TempDir::new().unwrap();
        let paths = RolloverPaths::with_base_dir(temp_dir.path().to_path_buf());

        handle_export_command(&workbook, &paths, ExportArgs::default()).unwrap();
        assert!(paths.export_dir().join("rollovers.csv").exists());
    }
}
