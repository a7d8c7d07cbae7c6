//! Entry service
//!
//! Validates user-supplied categories and ids before handing mutations to
//! the ledger store, and answers filtered history queries.

use crate::error::{LedgerError, LedgerResult};
use crate::models::category;
use crate::models::{Entry, EntryId, EntryKind, ExpenseEntry, IncomeEntry, Month};
use crate::storage::{EditedEntry, EntryCollection, LedgerStore};

/// Options for filtering entry history
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFilter<R> {
    /// Only entries tagged with this month
    pub month: Option<Month>,
    /// Only entries in this category
    pub category: Option<R>,
}

impl<R> Default for EntryFilter<R> {
    fn default() -> Self {
        Self {
            month: None,
            category: None,
        }
    }
}

impl<R: PartialEq> EntryFilter<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by month
    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Filter by category
    pub fn category(mut self, category: R) -> Self {
        self.category = Some(category);
        self
    }

    fn matches(&self, entry: &Entry<R>) -> bool {
        self.month.map_or(true, |m| entry.month == m)
            && self.category.as_ref().map_or(true, |c| &entry.category == c)
    }
}

/// Service for recording and revising entries
pub struct EntryService<'a> {
    store: &'a mut LedgerStore,
}

impl<'a> EntryService<'a> {
    pub fn new(store: &'a mut LedgerStore) -> Self {
        Self { store }
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &LedgerStore {
        self.store
    }

    /// Record an expense under a registry category
    pub fn add_expense(
        &mut self,
        index: i64,
        amount: &str,
        month: Month,
    ) -> LedgerResult<ExpenseEntry> {
        let position = usize::try_from(index).map_err(|_| {
            LedgerError::InvalidCategory(format!("negative expense category index {}", index))
        })?;
        category::expense_category(position)?;

        self.store.add_expense(index, amount, month)
    }

    /// Record income under a registry key
    pub fn add_income(
        &mut self,
        key: &str,
        amount: &str,
        month: Month,
    ) -> LedgerResult<IncomeEntry> {
        let key = key.trim();
        if category::find_income_category(key).is_none() {
            return Err(LedgerError::InvalidCategory(format!(
                "unknown income category '{}'",
                key
            )));
        }

        self.store.add_income(key, amount, month)
    }

    /// Change an entry's amount and, optionally, its month
    ///
    /// `id` may be a full id or a unique prefix. Without a month the entry
    /// keeps the one it has.
    pub fn edit(
        &mut self,
        kind: EntryKind,
        id: &str,
        amount: &str,
        month: Option<Month>,
    ) -> LedgerResult<EditedEntry> {
        let id = match self.resolve_id(kind, id) {
            Ok(id) => id,
            // Unknown ids still reach the store, which checks the amount first
            Err(e) if e.is_not_found() => EntryId::from_string(id.trim()),
            Err(e) => return Err(e),
        };
        let month = month
            .or_else(|| self.month_of(kind, &id))
            .unwrap_or_else(Month::current);

        self.store.edit(kind, &id, amount, month)
    }

    /// Remove an entry by id or unique prefix
    ///
    /// An id that matches nothing removes nothing and returns `false`. A
    /// prefix matching several entries is an error.
    pub fn delete(&mut self, kind: EntryKind, id: &str) -> LedgerResult<bool> {
        let id = match self.resolve_id(kind, id) {
            Ok(id) => id,
            Err(e) if e.is_not_found() => EntryId::from_string(id.trim()),
            Err(e) => return Err(e),
        };

        Ok(self.store.delete(kind, &id))
    }

    /// Turn a full id or unique prefix into the entry's id
    pub fn resolve_id(&self, kind: EntryKind, text: &str) -> LedgerResult<EntryId> {
        let text = text.trim();
        let candidates: Vec<EntryId> = match kind {
            EntryKind::Expense => resolve_in(self.store.expenses(), text),
            EntryKind::Income => resolve_in(self.store.income(), text),
        };

        match candidates.as_slice() {
            [id] => Ok(id.clone()),
            [] => Err(match kind {
                EntryKind::Expense => LedgerError::expense_not_found(text),
                EntryKind::Income => LedgerError::income_not_found(text),
            }),
            many => Err(LedgerError::Validation(format!(
                "'{}' matches {} {} entries; use more characters",
                text,
                many.len(),
                kind
            ))),
        }
    }

    /// Expense history matching `filter`, in insertion order
    pub fn list_expenses(&self, filter: &EntryFilter<i64>) -> Vec<ExpenseEntry> {
        self.store
            .expenses()
            .all()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    /// Income history matching `filter`, in insertion order
    pub fn list_income(&self, filter: &EntryFilter<String>) -> Vec<IncomeEntry> {
        self.store
            .income()
            .all()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    fn month_of(&self, kind: EntryKind, id: &EntryId) -> Option<Month> {
        match kind {
            EntryKind::Expense => self.store.expenses().get(id).map(|e| e.month),
            EntryKind::Income => self.store.income().get(id).map(|e| e.month),
        }
    }
}

// An exact match wins even if the text is also a prefix of other ids.
fn resolve_in<R>(collection: &EntryCollection<R>, text: &str) -> Vec<EntryId> {
    if let Some(entry) = collection.get(&EntryId::from_string(text)) {
        return vec![entry.id.clone()];
    }
    collection
        .find_by_prefix(text)
        .into_iter()
        .map(|e| e.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;
    use crate::services::aggregation::sum_by_expense_category;
    use crate::storage::{MemoryStore, PersistencePort};

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_expense_validates_index() {
        let mut store = LedgerStore::in_memory();
        let mut service = EntryService::new(&mut store);

        assert!(service.add_expense(17, "100", month("2025-06")).is_ok());

        for bad in [18, -1] {
            let err = service.add_expense(bad, "100", month("2025-06")).unwrap_err();
            assert!(err.is_invalid_category());
        }
        assert_eq!(store.expenses().len(), 1);
    }

    #[test]
    fn test_add_income_validates_key() {
        let mut store = LedgerStore::in_memory();
        let mut service = EntryService::new(&mut store);

        let entry = service.add_income(" EE ", "2500", month("2025-06")).unwrap();
        assert_eq!(entry.category, "EE");

        let err = service.add_income("Z", "100", month("2025-06")).unwrap_err();
        assert!(err.is_invalid_category());
        assert_eq!(store.income().len(), 1);
    }

    #[test]
    fn test_invalid_amount_leaves_store_untouched() {
        let mut store = LedgerStore::in_memory();
        let mut service = EntryService::new(&mut store);

        assert!(service
            .add_expense(0, "abc", month("2025-06"))
            .unwrap_err()
            .is_invalid_amount());
        assert!(store.expenses().is_empty());
    }

    #[test]
    fn test_edit_by_prefix_keeps_month() {
        let mut store = LedgerStore::in_memory();
        let mut service = EntryService::new(&mut store);
        let entry = service.add_expense(3, "100", month("2025-04")).unwrap();

        let edited = service
            .edit(EntryKind::Expense, entry.id.short(), "250", None)
            .unwrap();

        assert_eq!(edited.id(), &entry.id);
        assert_eq!(edited.amount(), Amount::from_units(250));
        assert_eq!(edited.month(), month("2025-04"));
    }

    #[test]
    fn test_edit_moves_month() {
        let mut store = LedgerStore::in_memory();
        let mut service = EntryService::new(&mut store);
        let entry = service.add_income("A", "100", month("2025-04")).unwrap();

        service
            .edit(EntryKind::Income, entry.id.as_str(), "100", Some(month("2025-05")))
            .unwrap();

        let filter = EntryFilter::new().month(month("2025-05"));
        assert_eq!(service.list_income(&filter).len(), 1);
        let filter = EntryFilter::new().month(month("2025-04"));
        assert!(service.list_income(&filter).is_empty());
    }

    #[test]
    fn test_edit_twice_is_idempotent() {
        let mut store = LedgerStore::in_memory();
        let mut service = EntryService::new(&mut store);
        let entry = service.add_expense(5, "100", month("2025-04")).unwrap();

        let first = service
            .edit(EntryKind::Expense, entry.id.as_str(), "300", None)
            .unwrap();
        let second = service
            .edit(EntryKind::Expense, entry.id.as_str(), "300", None)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.expenses().len(), 1);
    }

    #[test]
    fn test_edit_unknown_id_is_not_found() {
        let mut store = LedgerStore::in_memory();
        let mut service = EntryService::new(&mut store);

        let err = service
            .edit(EntryKind::Expense, "nope", "10", None)
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service
            .edit(EntryKind::Expense, "nope", "ten", None)
            .unwrap_err();
        assert!(err.is_invalid_amount());
    }

    #[test]
    fn test_ambiguous_prefix() {
        let port = MemoryStore::new().with_value(
            "expenseRecords",
            r#"[
                {"id":"ab01","item":0,"amount":1,"date":"","month":"2025-01"},
                {"id":"ab02","item":1,"amount":2,"date":"","month":"2025-01"},
                {"id":"ab","item":2,"amount":3,"date":"","month":"2025-01"}
            ]"#,
        );
        let mut store = LedgerStore::load(Box::new(port)).unwrap();
        let service = EntryService::new(&mut store);

        let err = service.resolve_id(EntryKind::Expense, "ab0").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        // An exact id wins over a prefix match
        assert_eq!(
            service.resolve_id(EntryKind::Expense, "ab").unwrap().as_str(),
            "ab"
        );
        assert_eq!(
            service.resolve_id(EntryKind::Expense, "ab02").unwrap().as_str(),
            "ab02"
        );
    }

    #[test]
    fn test_delete_unknown_is_noop_but_persists() {
        let port = MemoryStore::new();
        let mut store = LedgerStore::load(Box::new(port.clone())).unwrap();
        let mut service = EntryService::new(&mut store);

        assert!(!service.delete(EntryKind::Income, "missing").unwrap());
        assert_eq!(port.read("incomeRecords").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_delete_then_totals() {
        let mut store = LedgerStore::in_memory();
        let mut service = EntryService::new(&mut store);
        let keep = service.add_expense(0, "100", month("2025-06")).unwrap();
        let drop = service.add_expense(0, "40", month("2025-06")).unwrap();

        let bucket = |store: &LedgerStore| {
            sum_by_expense_category(store.expenses().for_month(month("2025-06")))
                .unwrap()
                .get(0)
        };
        assert_eq!(bucket(service.store()), Some(Amount::from_units(140)));

        assert!(service.delete(EntryKind::Expense, drop.id.as_str()).unwrap());

        let remaining = service.list_expenses(&EntryFilter::new().month(month("2025-06")));
        assert_eq!(remaining, vec![keep]);
        assert_eq!(bucket(service.store()), Some(Amount::from_units(100)));
    }

    #[test]
    fn test_list_filters_by_category() {
        let mut store = LedgerStore::in_memory();
        let mut service = EntryService::new(&mut store);
        service.add_expense(0, "1", month("2025-06")).unwrap();
        service.add_expense(4, "2", month("2025-06")).unwrap();
        service.add_expense(4, "3", month("2025-07")).unwrap();

        let filter = EntryFilter::new().category(4);
        let amounts: Vec<Amount> = service.list_expenses(&filter).iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![Amount::from_units(2), Amount::from_units(3)]);

        let filter = EntryFilter::new().category(4).month(month("2025-06"));
        assert_eq!(service.list_expenses(&filter).len(), 1);
    }
}
