//! Rollover reset engine
//!
//! Walks forward month by month from a starting month up to the current
//! month, recomputing each ledger entry from its predecessor so that
//! `BOM(n) == EOM(n - 1)` holds across the walked range:
//!
//! ```text
//! BOM = previous EOM
//! EOM = BOM + effective budget + signed transaction total
//! ```
//!
//! Categories never share ledger rows, so each one is reset independently by
//! a small pool of scoped worker threads.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::error::{RolloverError, RolloverResult};
use crate::models::{MonthPeriod, RolloverEntry};
use crate::services::{BudgetService, LookupService, RolloverService, TransactionService};
use crate::storage::TabularStore;

/// Hard limit on months walked per category
pub const DEFAULT_MAX_MONTHS: u32 = 24;

/// Default number of categories reset concurrently
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Limits applied to a reset run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetOptions {
    /// Maximum number of months walked per category
    pub max_months: u32,
    /// Maximum number of categories processed at once (1 = sequential)
    pub max_workers: usize,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl From<&Settings> for ResetOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            max_months: settings.max_months,
            max_workers: settings.max_workers,
        }
    }
}

/// Result of resetting one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReset {
    pub expense: String,
    /// Number of months recomputed
    pub months_processed: u32,
    /// Whether the walk stopped at the month limit before reaching the current month
    pub capped: bool,
    /// First month that was not processed because of the limit
    pub resume_from: Option<MonthPeriod>,
    /// The last recomputed entry
    pub last_entry: Option<RolloverEntry>,
}

/// Outcome of a reset run, one item per category in request order
#[derive(Debug)]
pub struct ResetReport {
    pub start: MonthPeriod,
    pub current: MonthPeriod,
    pub results: Vec<(String, RolloverResult<CategoryReset>)>,
}

impl ResetReport {
    /// Check whether every category was reset
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_ok())
    }

    /// Categories that were reset
    pub fn succeeded(&self) -> impl Iterator<Item = &CategoryReset> {
        self.results.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    /// Categories that failed, with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&str, &RolloverError)> {
        self.results
            .iter()
            .filter_map(|(expense, r)| r.as_ref().err().map(|e| (expense.as_str(), e)))
    }

    /// One-line status for the host to display
    pub fn status_line(&self) -> String {
        let failed = self.failures().count();
        if failed == 0 {
            "Done".to_string()
        } else {
            format!(
                "Failed: {} of {} categories could not be reset",
                failed,
                self.results.len()
            )
        }
    }
}

impl fmt::Display for ResetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status_line())?;
        for reset in self.succeeded() {
            write!(
                f,
                "  {}: {} month(s) recomputed",
                reset.expense, reset.months_processed
            )?;
            if let Some(entry) = &reset.last_entry {
                write!(f, ", EOM {} = {}", entry.period, entry.eom)?;
            }
            if let Some(resume) = reset.resume_from {
                write!(f, " (stopped at the month limit, resume from {})", resume)?;
            }
            writeln!(f)?;
        }
        for (expense, err) in self.failures() {
            writeln!(f, "  {}: {}", expense, err)?;
        }
        Ok(())
    }
}

/// Engine that recomputes the rollover chain
pub struct RolloverEngine<'a> {
    store: &'a dyn TabularStore,
    options: ResetOptions,
}

impl<'a> RolloverEngine<'a> {
    /// Create an engine with default limits
    pub fn new(store: &'a dyn TabularStore) -> Self {
        Self {
            store,
            options: ResetOptions::default(),
        }
    }

    /// Create an engine with explicit limits
    pub fn with_options(store: &'a dyn TabularStore, options: ResetOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> ResetOptions {
        self.options
    }

    /// Reset the rollover chain from `start` up to and including `current`
    ///
    /// With `expense` set only that category is reset; otherwise every
    /// category of the `Expenses` range is. A category whose reset fails is
    /// reported in the result without affecting the others. Only a failure
    /// to list the categories fails the whole call.
    pub fn reset_rollover(
        &self,
        start: MonthPeriod,
        expense: Option<&str>,
        current: MonthPeriod,
    ) -> RolloverResult<ResetReport> {
        let expenses = match expense {
            Some(expense) => vec![expense.to_string()],
            None => LookupService::new(self.store).expense_list()?,
        };

        info!(
            start = %start,
            current = %current,
            categories = expenses.len(),
            "Resetting rollovers"
        );

        let results = self.run_pool(&expenses, |expense| {
            self.reset_category(start, expense, current)
        });

        Ok(ResetReport {
            start,
            current,
            results: expenses.into_iter().zip(results).collect(),
        })
    }

    /// Reset a single category
    pub fn reset_category(
        &self,
        start: MonthPeriod,
        expense: &str,
        current: MonthPeriod,
    ) -> RolloverResult<CategoryReset> {
        if start > current {
            warn!(
                expense,
                start = %start,
                current = %current,
                "Cannot reset rollover for a future date"
            );
            return Err(RolloverError::FutureStart {
                period: start,
                current,
            });
        }

        let rollovers = RolloverService::new(self.store);
        let transactions = TransactionService::new(self.store);
        let budgets = BudgetService::new(self.store);

        let mut period = start;
        let mut months_processed = 0;
        let mut last_entry = None;

        while period <= current && months_processed < self.options.max_months {
            let mut entry = rollovers.get_or_create(&period, expense)?;
            let previous = rollovers.get_or_create(&period.prev(), expense)?;

            let expenses = transactions.sum_transactions(expense, &period)?;
            let budget = budgets.resolve_budget(expense, Some(&period))?;
            entry.carry_forward(previous.eom, budget, expenses)?;

            rollovers.update(&entry)?;

            debug!(
                expense,
                period = %period,
                bom = %entry.bom,
                budget = %budget,
                expenses = %entry.expenses,
                eom = %entry.eom,
                "Recomputed rollover"
            );

            last_entry = Some(entry);
            months_processed += 1;
            period = period.next();
        }

        let capped = period <= current;
        if capped {
            warn!(
                expense,
                limit = self.options.max_months,
                resume_from = %period,
                "Stopped at the month limit before reaching the current month"
            );
        }

        info!(expense, months = months_processed, "Rollover reset complete");

        Ok(CategoryReset {
            expense: expense.to_string(),
            months_processed,
            capped,
            resume_from: capped.then_some(period),
            last_entry,
        })
    }

    /// Run `job` for every expense on up to `max_workers` threads, returning
    /// results in input order
    fn run_pool<T, F>(&self, expenses: &[String], job: F) -> Vec<RolloverResult<T>>
    where
        T: Send,
        F: Fn(&str) -> RolloverResult<T> + Sync,
    {
        let workers = self.options.max_workers.clamp(1, expenses.len().max(1));
        if workers == 1 {
            return expenses.iter().map(|e| job(e)).collect();
        }

        let next = AtomicUsize::new(0);
        let slots: Mutex<Vec<Option<RolloverResult<T>>>> =
            Mutex::new(expenses.iter().map(|_| None).collect());

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    let Some(expense) = expenses.get(index) else {
                        break;
                    };
                    let result = job(expense);
                    let mut slots = slots.lock().unwrap_or_else(|e| e.into_inner());
                    slots[index] = Some(result);
                });
            }
        });

        slots
            .into_inner()
            .unwrap_or_else(|e| e.into_inner())
            .into_iter()
            .zip(expenses)
            .map(|(slot, expense)| {
                slot.unwrap_or_else(|| {
                    Err(RolloverError::Storage(format!(
                        "Worker exited before resetting '{}'",
                        expense
                    )))
                })
            })
            .collect()
    }
}
