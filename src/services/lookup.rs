//! Reference lookups
//!
//! Read-only views of the workbook's reference data: accounts, matching
//! rules, the configured expense list and the ids of imported transactions.

use std::collections::BTreeMap;

use crate::error::RolloverResult;
use crate::models::{Account, MatchingRule, Money};
use crate::storage::tables::{EXPENSES_RANGE, TRANSACTION_IDS_RANGE};
use crate::storage::{read_all, TabularStore};

/// Service for reference data
pub struct LookupService<'a> {
    store: &'a dyn TabularStore,
}

impl<'a> LookupService<'a> {
    pub fn new(store: &'a dyn TabularStore) -> Self {
        Self { store }
    }

    /// Map of account number to account name
    ///
    /// A number listed twice maps to the name of its last row.
    pub fn accounts(&self) -> RolloverResult<BTreeMap<String, String>> {
        let accounts: Vec<Account> = read_all(self.store)?;
        Ok(accounts
            .into_iter()
            .map(|a| (a.number, a.name))
            .collect())
    }

    pub fn matching_rules(&self) -> RolloverResult<Vec<MatchingRule>> {
        read_all(self.store)
    }

    /// Find the first rule, in table order, matching a transaction
    ///
    /// Rules with an `Amount` only match when `amount` is given and equal.
    pub fn match_rule(
        &self,
        description: &str,
        amount: Option<Money>,
    ) -> RolloverResult<Option<MatchingRule>> {
        Ok(self
            .matching_rules()?
            .into_iter()
            .find(|rule| rule.matches(description, amount)))
    }

    /// The configured expense categories, in workbook order
    pub fn expense_list(&self) -> RolloverResult<Vec<String>> {
        self.store.read_named_values(EXPENSES_RANGE)
    }

    /// Ids of every imported transaction
    pub fn transaction_ids(&self) -> RolloverResult<Vec<String>> {
        self.store.read_named_values(TRANSACTION_IDS_RANGE)
    }
}
