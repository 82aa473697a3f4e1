//! Typed access to the workbook tables
//!
//! Each model that lives in a workbook table implements [`TableRow`], which
//! names the table and converts between cells and the model.

use serde_json::Value;

use super::row::{
    money_cell, read_money, read_month, read_optional_text, read_text, read_year, Row,
};
use super::TabularStore;
use crate::error::{RolloverError, RolloverResult};
use crate::models::{
    Account, BudgetOverride, ExpenseBudget, MatchingRule, MonthPeriod, RolloverEntry, Transaction,
};

/// Table names
pub const ACCOUNTS: &str = "Accounts";
pub const MATCHING_RULES: &str = "MatchingRules";
pub const TRANSACTIONS: &str = "Transactions";
pub const ROLLOVERS: &str = "Rollovers";
pub const EXPENSE_DATA: &str = "ExpenseData";
pub const BUDGET_HISTORY: &str = "BudgetHistory";

/// Named range holding the configured expense categories
pub const EXPENSES_RANGE: &str = "Expenses";
/// Named range holding the ids of every imported transaction
pub const TRANSACTION_IDS_RANGE: &str = "TransactionIds";

/// All tables a workbook is expected to contain, with their column headers
pub const STANDARD_TABLES: &[(&str, &[&str])] = &[
    (ACCOUNTS, &["Number", "Name"]),
    (MATCHING_RULES, &["Match 1", "Match 2", "Amount", "Expense Type"]),
    (
        TRANSACTIONS,
        &["Id", "Month", "Year", "Expense Type", "Amount", "Description", "Account"],
    ),
    (ROLLOVERS, &["Month", "Year", "Expense", "Expenses", "BOM", "EOM"]),
    (EXPENSE_DATA, &["Expense Type", "Init", "Budget"]),
    (
        BUDGET_HISTORY,
        &["Expense", "Amount", "Month Start", "Month End", "Year Start", "Year End"],
    ),
];

// Older workbooks label the category column "Expense" in every table.
const EXPENSE_TYPE: &[&str] = &["Expense Type", "Expense"];
const EXPENSE: &[&str] = &["Expense", "Expense Type"];

/// A model stored as one row of a workbook table
pub trait TableRow: Sized {
    /// Name of the table holding these rows
    const TABLE: &'static str;

    /// Decode a row
    fn from_row(row: &Row) -> RolloverResult<Self>;

    /// Encode as a row
    fn to_row(&self) -> Row;
}

/// Read and decode every row of a model's table, in storage order
pub fn read_all<T: TableRow>(store: &dyn TabularStore) -> RolloverResult<Vec<T>> {
    store
        .read_table(T::TABLE)?
        .iter()
        .enumerate()
        .map(|(index, row)| {
            T::from_row(row).map_err(|e| match e {
                RolloverError::InvalidRow { table, reason } => RolloverError::InvalidRow {
                    table,
                    reason: format!("row {}: {}", index, reason),
                },
                other => other,
            })
        })
        .collect()
}

fn period(table: &str, row: &Row) -> RolloverResult<MonthPeriod> {
    let month = read_month(table, row, &["Month"])?;
    let year = read_year(table, row, &["Year"])?;
    MonthPeriod::new(year, month)
}

impl TableRow for Transaction {
    const TABLE: &'static str = TRANSACTIONS;

    fn from_row(row: &Row) -> RolloverResult<Self> {
        Ok(Self {
            id: read_optional_text(row, &["Id"]),
            period: period(Self::TABLE, row)?,
            expense: read_text(row, EXPENSE_TYPE),
            amount: read_money(Self::TABLE, row, &["Amount"])?,
            description: read_text(row, &["Description"]),
            account: read_optional_text(row, &["Account"]),
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert(
            "Id".into(),
            self.id.clone().map(Value::from).unwrap_or(Value::Null),
        );
        row.insert("Month".into(), Value::from(self.period.month));
        row.insert("Year".into(), Value::from(self.period.year));
        row.insert("Expense Type".into(), Value::from(self.expense.clone()));
        row.insert("Amount".into(), money_cell(self.amount));
        row.insert("Description".into(), Value::from(self.description.clone()));
        row.insert(
            "Account".into(),
            self.account.clone().map(Value::from).unwrap_or(Value::Null),
        );
        row
    }
}

impl TableRow for RolloverEntry {
    const TABLE: &'static str = ROLLOVERS;

    fn from_row(row: &Row) -> RolloverResult<Self> {
        Ok(Self {
            period: period(Self::TABLE, row)?,
            expense: read_text(row, EXPENSE),
            expenses: read_money(Self::TABLE, row, &["Expenses"])?,
            bom: read_money(Self::TABLE, row, &["BOM"])?,
            eom: read_money(Self::TABLE, row, &["EOM"])?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("Month".into(), Value::from(self.period.month));
        row.insert("Year".into(), Value::from(self.period.year));
        row.insert("Expense".into(), Value::from(self.expense.clone()));
        row.insert("Expenses".into(), money_cell(self.expenses));
        row.insert("BOM".into(), money_cell(self.bom));
        row.insert("EOM".into(), money_cell(self.eom));
        row
    }
}

impl TableRow for ExpenseBudget {
    const TABLE: &'static str = EXPENSE_DATA;

    fn from_row(row: &Row) -> RolloverResult<Self> {
        Ok(Self {
            expense: read_text(row, EXPENSE_TYPE),
            init: read_money(Self::TABLE, row, &["Init"])?,
            budget: read_money(Self::TABLE, row, &["Budget"])?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("Expense Type".into(), Value::from(self.expense.clone()));
        row.insert("Init".into(), money_cell(self.init));
        row.insert("Budget".into(), money_cell(self.budget));
        row
    }
}

impl TableRow for BudgetOverride {
    const TABLE: &'static str = BUDGET_HISTORY;

    fn from_row(row: &Row) -> RolloverResult<Self> {
        Ok(Self {
            expense: read_text(row, EXPENSE),
            amount: read_money(Self::TABLE, row, &["Amount"])?,
            month_start: read_month(Self::TABLE, row, &["Month Start"])?,
            month_end: read_month(Self::TABLE, row, &["Month End"])?,
            year_start: read_year(Self::TABLE, row, &["Year Start"])?,
            year_end: read_year(Self::TABLE, row, &["Year End"])?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("Expense".into(), Value::from(self.expense.clone()));
        row.insert("Amount".into(), money_cell(self.amount));
        row.insert("Month Start".into(), Value::from(self.month_start));
        row.insert("Month End".into(), Value::from(self.month_end));
        row.insert("Year Start".into(), Value::from(self.year_start));
        row.insert("Year End".into(), Value::from(self.year_end));
        row
    }
}

impl TableRow for Account {
    const TABLE: &'static str = ACCOUNTS;

    fn from_row(row: &Row) -> RolloverResult<Self> {
        Ok(Self {
            number: read_text(row, &["Number"]),
            name: read_text(row, &["Name"]),
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("Number".into(), Value::from(self.number.clone()));
        row.insert("Name".into(), Value::from(self.name.clone()));
        row
    }
}

impl TableRow for MatchingRule {
    const TABLE: &'static str = MATCHING_RULES;

    fn from_row(row: &Row) -> RolloverResult<Self> {
        Ok(Self {
            match_1: read_text(row, &["Match 1"]),
            match_2: read_text(row, &["Match 2"]),
            amount: read_text(row, &["Amount"]),
            expense: read_text(row, EXPENSE_TYPE),
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("Match 1".into(), Value::from(self.match_1.clone()));
        row.insert("Match 2".into(), Value::from(self.match_2.clone()));
        row.insert("Amount".into(), Value::from(self.amount.clone()));
        row.insert("Expense Type".into(), Value::from(self.expense.clone()));
        row
    }
}
