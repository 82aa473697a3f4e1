//! Ledger display formatting

use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::models::{ExpenseBudget, Money, RolloverEntry};

#[derive(Tabled)]
struct RolloverRow {
    #[tabled(rename = "Month")]
    period: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "BOM")]
    bom: Money,
    #[tabled(rename = "Expenses")]
    expenses: Money,
    #[tabled(rename = "EOM")]
    eom: Money,
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Init")]
    init: Money,
    #[tabled(rename = "Budget")]
    budget: Money,
    #[tabled(rename = "Effective")]
    effective: Money,
}

/// Format ledger entries as a table
pub fn format_rollover_table(entries: &[RolloverEntry]) -> String {
    if entries.is_empty() {
        return "No rollover entries found.\n\nRun 'rollover reset' to build the ledger."
            .to_string();
    }

    let rows = entries.iter().map(|e| RolloverRow {
        period: e.period.to_string(),
        expense: e.expense.clone(),
        bom: e.bom,
        expenses: e.expenses,
        eom: e.eom,
    });

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string()
}

/// Format budget configuration with the budget in effect for a month
pub fn format_budget_table(budgets: &[(ExpenseBudget, Money)]) -> String {
    if budgets.is_empty() {
        return "No expenses configured.".to_string();
    }

    let rows = budgets.iter().map(|(b, effective)| BudgetRow {
        expense: b.expense.clone(),
        init: b.init,
        budget: b.budget,
        effective: *effective,
    });

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}
