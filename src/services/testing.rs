//! Shared fixtures for service tests

use crate::error::{RolloverError, RolloverResult};
use crate::models::{BudgetOverride, ExpenseBudget, Money, MonthPeriod, RolloverEntry, Transaction};
use crate::storage::row::read_text;
use crate::storage::{Row, TableRow, TabularStore, Workbook};

pub fn period(year: i32, month: u32) -> MonthPeriod {
    MonthPeriod::new(year, month).unwrap()
}

pub fn money(amount: f64) -> Money {
    Money::from_f64(amount).unwrap()
}

pub fn add_expense(workbook: &Workbook, expense: &str, init: f64, budget: f64) {
    let row = ExpenseBudget::new(expense, money(init), money(budget)).to_row();
    workbook.append_row("ExpenseData", row).unwrap();
}

pub fn add_transaction(workbook: &Workbook, period: MonthPeriod, expense: &str, amount: f64) {
    let row = Transaction::new(period, expense, money(amount)).to_row();
    workbook.append_row("Transactions", row).unwrap();
}

pub fn add_override(
    workbook: &Workbook,
    expense: &str,
    amount: f64,
    months: (u32, u32),
    years: (i32, i32),
) {
    let row = BudgetOverride {
        expense: expense.into(),
        amount: money(amount),
        month_start: months.0,
        month_end: months.1,
        year_start: years.0,
        year_end: years.1,
    }
    .to_row();
    workbook.append_row("BudgetHistory", row).unwrap();
}

pub fn add_rollover(workbook: &Workbook, entry: &RolloverEntry) {
    workbook.append_row("Rollovers", entry.to_row()).unwrap();
}

pub fn rollover_rows(workbook: &Workbook) -> Vec<RolloverEntry> {
    crate::storage::read_all(workbook).unwrap()
}

/// A store whose every operation fails
pub struct FailingStore;

impl TabularStore for FailingStore {
    fn read_table(&self, _table: &str) -> RolloverResult<Vec<Row>> {
        Err(RolloverError::Storage("disk on fire".into()))
    }

    fn read_named_values(&self, _name: &str) -> RolloverResult<Vec<String>> {
        Err(RolloverError::Storage("disk on fire".into()))
    }

    fn append_row(&self, _table: &str, _row: Row) -> RolloverResult<()> {
        Err(RolloverError::Storage("disk on fire".into()))
    }

    fn update_row(&self, _table: &str, _index: usize, _row: Row) -> RolloverResult<()> {
        Err(RolloverError::Storage("disk on fire".into()))
    }
}

/// A workbook whose writes fail for the rows of one expense category
pub struct ExpenseWriteFailStore {
    pub inner: Workbook,
    pub expense: String,
}

impl ExpenseWriteFailStore {
    pub fn new(inner: Workbook, expense: &str) -> Self {
        Self {
            inner,
            expense: expense.to_string(),
        }
    }

    fn check(&self, row: &Row) -> RolloverResult<()> {
        if read_text(row, &["Expense", "Expense Type"]) == self.expense {
            return Err(RolloverError::Storage(format!(
                "write rejected for {}",
                self.expense
            )));
        }
        Ok(())
    }
}

impl TabularStore for ExpenseWriteFailStore {
    fn read_table(&self, table: &str) -> RolloverResult<Vec<Row>> {
        self.inner.read_table(table)
    }

    fn read_named_values(&self, name: &str) -> RolloverResult<Vec<String>> {
        self.inner.read_named_values(name)
    }

    fn append_row(&self, table: &str, row: Row) -> RolloverResult<()> {
        self.check(&row)?;
        self.inner.append_row(table, row)
    }

    fn update_row(&self, table: &str, index: usize, row: Row) -> RolloverResult<()> {
        self.check(&row)?;
        self.inner.update_row(table, index, row)
    }
}
