//! Rollover ledger repository
//!
//! Get-or-create and update of `Rollovers` rows keyed by (month, year,
//! expense). The workbook has no unique-key constraint, so the key is
//! enforced here: a lookup that finds several rows for one key warns and
//! treats the first row in storage order as the entry, and `update` writes
//! to that same row.

use tracing::{debug, warn};

use crate::error::{RolloverError, RolloverResult};
use crate::models::{MonthPeriod, RolloverEntry};
use crate::services::{BudgetService, TransactionService};
use crate::storage::{read_all, TableRow, TabularStore};

/// Repository service for ledger entries
pub struct RolloverService<'a> {
    store: &'a dyn TabularStore,
}

impl<'a> RolloverService<'a> {
    /// Create a new rollover service
    pub fn new(store: &'a dyn TabularStore) -> Self {
        Self { store }
    }

    /// List every ledger entry in storage order
    pub fn list(&self) -> RolloverResult<Vec<RolloverEntry>> {
        read_all(self.store)
    }

    /// List the ledger entries of one category, oldest first
    pub fn list_for_expense(&self, expense: &str) -> RolloverResult<Vec<RolloverEntry>> {
        let mut entries: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|e| e.expense == expense)
            .collect();
        entries.sort_by_key(|e| e.period);
        Ok(entries)
    }

    /// Find the entry for a key, with its row index
    pub fn find(
        &self,
        period: &MonthPeriod,
        expense: &str,
    ) -> RolloverResult<Option<(usize, RolloverEntry)>> {
        let mut matches = self
            .list()?
            .into_iter()
            .enumerate()
            .filter(|(_, entry)| entry.has_key(period, expense));

        let first = matches.next();
        let extra = matches.count();
        if extra > 0 {
            warn!(
                expense,
                period = %period,
                rows = extra + 1,
                "Multiple rollover entries for the same month, year and expense, using the first"
            );
        }

        Ok(first)
    }

    /// Get the entry for a key, creating it if it does not exist
    ///
    /// A created entry records the month's transaction total and is seeded
    /// with `BOM = EOM = Init` of the category. It is not chained to its
    /// predecessor; the rollover walk does that.
    pub fn get_or_create(
        &self,
        period: &MonthPeriod,
        expense: &str,
    ) -> RolloverResult<RolloverEntry> {
        if let Some((_, entry)) = self.find(period, expense)? {
            return Ok(entry);
        }

        let expenses = TransactionService::new(self.store).sum_transactions(expense, period)?;
        let initial = BudgetService::new(self.store).initial_amount(expense)?;

        let entry = RolloverEntry::seeded(*period, expense, expenses, initial);
        self.store.append_row(RolloverEntry::TABLE, entry.to_row())?;

        debug!(
            expense,
            period = %period,
            expenses = %entry.expenses,
            initial = %initial,
            "Created rollover entry"
        );

        Ok(entry)
    }

    /// Overwrite the persisted entry with the same key
    ///
    /// Fails with a not-found error if no row has the entry's key.
    pub fn update(&self, entry: &RolloverEntry) -> RolloverResult<()> {
        let (index, _) = self
            .find(&entry.period, &entry.expense)?
            .ok_or_else(|| RolloverError::rollover_not_found(entry.key().to_string()))?;

        self.store
            .update_row(RolloverEntry::TABLE, index, entry.to_row())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::testing::{
        add_expense, add_rollover, add_transaction, period, rollover_rows, FailingStore,
    };
    use crate::storage::Workbook;

    fn workbook() -> Workbook {
        let workbook = Workbook::with_standard_layout();
        add_expense(&workbook, "Groceries", 500.0, 600.0);
        add_transaction(&workbook, period(2024, 1), "Groceries", -300.0);
        add_transaction(&workbook, period(2024, 1), "Groceries", -150.0);
        workbook
    }

    #[test]
    fn test_get_or_create_seeds_from_initial_amount() {
        let workbook = workbook();
        let service = RolloverService::new(&workbook);

        let entry = service.get_or_create(&period(2024, 1), "Groceries").unwrap();
        assert_eq!(entry.expenses, Money::from_cents(-45000));
        assert_eq!(entry.bom, Money::from_cents(50000));
        assert_eq!(entry.eom, Money::from_cents(50000));

        let rows = rollover_rows(&workbook);
        assert_eq!(rows, vec![entry]);
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let workbook = workbook();
        let service = RolloverService::new(&workbook);

        let first = service.get_or_create(&period(2024, 1), "Groceries").unwrap();
        let revision = workbook.revision();
        let second = service.get_or_create(&period(2024, 1), "Groceries").unwrap();

        assert_eq!(first, second);
        assert_eq!(workbook.revision(), revision);
        assert_eq!(rollover_rows(&workbook).len(), 1);
    }

    #[test]
    fn test_get_or_create_returns_existing_unchanged() {
        let workbook = workbook();
        let existing = RolloverEntry {
            period: period(2024, 1),
            expense: "Groceries".into(),
            expenses: Money::from_cents(-1),
            bom: Money::from_cents(2),
            eom: Money::from_cents(3),
        };
        add_rollover(&workbook, &existing);

        let service = RolloverService::new(&workbook);
        assert_eq!(
            service.get_or_create(&period(2024, 1), "Groceries").unwrap(),
            existing
        );
    }

    #[test]
    fn test_get_or_create_unconfigured_expense_writes_nothing() {
        let workbook = workbook();
        let service = RolloverService::new(&workbook);
        let revision = workbook.revision();

        let err = service.get_or_create(&period(2024, 1), "Travel").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(workbook.revision(), revision);
    }

    #[test]
    fn test_duplicates_resolve_to_first_row() {
        let workbook = workbook();
        let mut first = RolloverEntry::seeded(
            period(2024, 1),
            "Groceries",
            Money::zero(),
            Money::from_cents(100),
        );
        let second = RolloverEntry::seeded(
            period(2024, 1),
            "Groceries",
            Money::zero(),
            Money::from_cents(200),
        );
        add_rollover(&workbook, &first);
        add_rollover(&workbook, &second);

        let service = RolloverService::new(&workbook);
        assert_eq!(
            service.get_or_create(&period(2024, 1), "Groceries").unwrap(),
            first
        );

        first.eom = Money::from_cents(999);
        service.update(&first).unwrap();

        let rows = rollover_rows(&workbook);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].eom, Money::from_cents(999));
        assert_eq!(rows[1], second);
    }

    #[test]
    fn test_update_in_place() {
        let workbook = workbook();
        let service = RolloverService::new(&workbook);
        service.get_or_create(&period(2023, 12), "Groceries").unwrap();
        let mut entry = service.get_or_create(&period(2024, 1), "Groceries").unwrap();

        entry
            .carry_forward(
                Money::from_cents(50000),
                Money::from_cents(60000),
                Money::from_cents(-45000),
            )
            .unwrap();
        service.update(&entry).unwrap();

        let rows = rollover_rows(&workbook);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], entry);
        assert_eq!(rows[1].eom, Money::from_cents(65000));
    }

    #[test]
    fn test_update_missing_entry_is_not_found() {
        let workbook = workbook();
        let service = RolloverService::new(&workbook);
        let entry = RolloverEntry::seeded(period(2024, 5), "Groceries", Money::zero(), Money::zero());

        let err = service.update(&entry).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Rollover not found: Groceries 2024-05");
        assert!(rollover_rows(&workbook).is_empty());
    }

    #[test]
    fn test_list_for_expense_sorted() {
        let workbook = workbook();
        let service = RolloverService::new(&workbook);
        service.get_or_create(&period(2024, 2), "Groceries").unwrap();
        service.get_or_create(&period(2023, 11), "Groceries").unwrap();

        let entries = service.list_for_expense("Groceries").unwrap();
        let periods: Vec<_> = entries.iter().map(|e| e.period).collect();
        assert_eq!(periods, vec![period(2023, 11), period(2024, 2)]);
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = FailingStore;
        let service = RolloverService::new(&store);
        let err = service.get_or_create(&period(2024, 1), "Groceries").unwrap_err();
        assert!(matches!(err, RolloverError::Storage(_)));
    }
}
