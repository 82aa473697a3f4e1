//! Reference data CLI commands
//!
//! Read-only listings of the workbook's lookup data.

use clap::Subcommand;

use crate::error::{RolloverError, RolloverResult};
use crate::models::Money;
use crate::services::LookupService;
use crate::storage::TabularStore;

/// Reference data subcommands
#[derive(Subcommand, Debug)]
pub enum ReferenceCommands {
    /// List the configured expense categories
    Expenses,

    /// List accounts by number
    Accounts,

    /// List matching rules, or find the rule for a transaction
    Rules {
        /// Transaction description to match
        #[arg(short, long = "match")]
        description: Option<String>,

        /// Transaction amount, for rules that match on amount
        #[arg(short, long, requires = "description", allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// List the ids of imported transactions
    Ids,
}

fn parse_amount(amount: Option<&str>) -> RolloverResult<Option<Money>> {
    amount
        .map(|a| Money::parse(a).map_err(|e| RolloverError::Validation(e.to_string())))
        .transpose()
}

/// Handle reference data commands
pub fn handle_reference_command(
    store: &dyn TabularStore,
    cmd: ReferenceCommands,
) -> RolloverResult<()> {
    let lookup = LookupService::new(store);

    match cmd {
        ReferenceCommands::Expenses => {
            let expenses = lookup.expense_list()?;
            if expenses.is_empty() {
                println!("No expenses configured.");
            }
            for expense in expenses {
                println!("{}", expense);
            }
        }
        ReferenceCommands::Accounts => {
            let accounts = lookup.accounts()?;
            if accounts.is_empty() {
                println!("No accounts found.");
            }
            for (number, name) in &accounts {
                println!("{:<20} {}", number, name);
            }
        }
        ReferenceCommands::Rules {
            description,
            amount,
        } => {
            let amount = parse_amount(amount.as_deref())?;
            match description {
                Some(description) => match lookup.match_rule(&description, amount)? {
                    Some(rule) => println!("{} -> {}", description, rule.expense),
                    None => println!("No matching rule for '{}'", description),
                },
                None => {
                    for rule in lookup.matching_rules()? {
                        println!(
                            "{:<24} {:<24} {:>10} -> {}",
                            rule.match_1, rule.match_2, rule.amount, rule.expense
                        );
                    }
                }
            }
        }
        ReferenceCommands::Ids => {
            let ids = lookup.transaction_ids()?;
            println!("{} transaction id(s)", ids.len());
            for id in ids {
                println!("{}", id);
            }
        }
    }

    Ok(())
}
