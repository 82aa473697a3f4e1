use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use rollover_ledger::cli::{
    handle_budget_command, handle_export_command, handle_reference_command,
    handle_reset_command, handle_rollovers_command, BudgetArgs, ExportArgs, ReferenceCommands,
    ResetArgs, RolloversArgs,
};
use rollover_ledger::config::{paths::RolloverPaths, settings::Settings};
use rollover_ledger::logging::init_logging;
use rollover_ledger::RolloverResult;
use rollover_ledger::storage::Workbook;

#[derive(Parser)]
#[command(
    name = "rollover",
    author = "Kaylee Beyene",
    version,
    about = "Month-by-month budget rollover ledger",
    long_about = "Rollover keeps a running balance per expense category: each month \
                  starts from the previous month's closing balance, adds the budget \
                  and the month's transactions. Run 'rollover reset' after editing \
                  past transactions or budgets to rebuild the chain."
)]
struct Cli {
    /// Workbook file (defaults to workbook.json in the data directory)
    #[arg(long, global = true, env = "ROLLOVER_WORKBOOK")]
    workbook: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute the rollover chain from a month up to the current month
    Reset(ResetArgs),

    /// Show the rollover ledger
    #[command(alias = "ledger")]
    Rollovers(RolloversArgs),

    /// Show the budget in effect for each expense
    Budget(BudgetArgs),

    /// Export the rollover ledger to CSV
    Export(ExportArgs),

    #[command(flatten)]
    Reference(ReferenceCommands),

    /// Create an empty workbook and default settings
    Init {
        /// Replace an existing workbook
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = RolloverPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings.log_filter);

    let workbook_path = cli.workbook.unwrap_or_else(|| paths.workbook_file());

    match cli.command {
        Some(Commands::Init { force }) => {
            if workbook_path.exists() && !force {
                println!("Workbook already exists at: {}", workbook_path.display());
                println!("Use --force to replace it.");
                return Ok(());
            }
            println!("Initializing rollover ledger at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            Workbook::with_standard_layout()
                .with_path(workbook_path.clone())
                .save()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Workbook: {}", workbook_path.display());
            println!("Add expense categories to the ExpenseData table, then run 'rollover reset'.");
        }
        Some(Commands::Config) => {
            println!("Rollover Ledger Configuration");
            println!("=============================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Workbook:         {}", workbook_path.display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Max months per reset: {}", settings.max_months);
            println!("  Max workers:          {}", settings.max_workers);
            println!("  Log filter:           {}", settings.log_filter);
        }
        Some(Commands::Reset(args)) => with_workbook(&workbook_path, |workbook| {
            handle_reset_command(workbook, &settings, args).map(|_| ())
        })?,
        Some(Commands::Rollovers(args)) => {
            with_workbook(&workbook_path, |workbook| handle_rollovers_command(workbook, args))?
        }
        Some(Commands::Budget(args)) => {
            with_workbook(&workbook_path, |workbook| handle_budget_command(workbook, args))?
        }
        Some(Commands::Export(args)) => with_workbook(&workbook_path, |workbook| {
            handle_export_command(workbook, &paths, args)
        })?,
        Some(Commands::Reference(cmd)) => {
            with_workbook(&workbook_path, |workbook| handle_reference_command(workbook, cmd))?
        }
        None => {
            println!("Rollover Ledger - month-by-month budget rollover");
            println!();
            println!("Run 'rollover --help' for usage information.");
            println!("Run 'rollover init' to create a workbook.");
        }
    }

    Ok(())
}

/// Open the workbook, run a command against it and save it if the command wrote to it
fn with_workbook<F>(path: &Path, run: F) -> Result<()>
where
    F: FnOnce(&Workbook) -> RolloverResult<()>,
{
    if !path.exists() {
        bail!(
            "No workbook found at {}. Run 'rollover init' first.",
            path.display()
        );
    }
    let workbook =
        Workbook::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    run(&workbook)?;

    if workbook.revision() > 0 {
        debug!(revision = workbook.revision(), "Saving workbook");
        workbook
            .save()
            .with_context(|| format!("Failed to save {}", path.display()))?;
    }
    Ok(())
}
