//! Ledger entry model
//!
//! An entry records one income or expense amount against exactly one
//! category and one month. Expense entries reference their category by
//! registry index, income entries by key.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::ids::EntryId;
use super::month::Month;

/// Format used for the recorded-at text of new entries
pub const RECORDED_AT_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Which collection an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    /// Name of the persisted record key for this kind
    pub fn storage_key(&self) -> &'static str {
        match self {
            EntryKind::Expense => "expenseRecords",
            EntryKind::Income => "incomeRecords",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Expense => write!(f, "expense"),
            EntryKind::Income => write!(f, "income"),
        }
    }
}

/// A single recorded amount
///
/// `R` is the category reference: an index for expenses, a key for income.
/// The category is fixed at creation; only the amount and month can change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<R> {
    pub id: EntryId,

    /// Category reference
    #[serde(rename = "item")]
    pub category: R,

    pub amount: Amount,

    /// When the entry was created, for display only
    #[serde(rename = "date", default)]
    pub recorded_at: String,

    pub month: Month,
}

/// Expense entry, categorized by registry index
///
/// The index is kept signed so that corrupt records still load and can be
/// reported by aggregation instead of failing the whole store.
pub type ExpenseEntry = Entry<i64>;

/// Income entry, categorized by key
pub type IncomeEntry = Entry<String>;

impl<R> Entry<R> {
    /// Create a new entry with a fresh id and the current local time
    pub fn new(category: R, amount: Amount, month: Month) -> Self {
        Self {
            id: EntryId::new(),
            category,
            amount,
            recorded_at: Local::now().format(RECORDED_AT_FORMAT).to_string(),
            month,
        }
    }

    /// Replace the amount and month; the category never changes
    pub fn revise(&mut self, amount: Amount, month: Month) {
        self.amount = amount;
        self.month = month;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june() -> Month {
        Month::new(2025, 6).unwrap()
    }

    #[test]
    fn test_new_entry() {
        let entry = ExpenseEntry::new(3, Amount::from_units(1200), june());

        assert_eq!(entry.category, 3);
        assert_eq!(entry.amount, Amount::from_units(1200));
        assert_eq!(entry.month, june());
        assert!(!entry.recorded_at.is_empty());
    }

    #[test]
    fn test_revise_keeps_identity_and_category() {
        let mut entry = IncomeEntry::new("B".to_string(), Amount::from_units(5000), june());
        let id = entry.id.clone();

        entry.revise(Amount::from_units(-200), june().next());

        assert_eq!(entry.id, id);
        assert_eq!(entry.category, "B");
        assert_eq!(entry.amount, Amount::from_units(-200));
        assert_eq!(entry.month, Month::new(2025, 7).unwrap());
    }

    #[test]
    fn test_persisted_field_names() {
        let entry = ExpenseEntry::new(0, Amount::from_units(-500), june());
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["item"], 0);
        assert_eq!(value["amount"], -500);
        assert_eq!(value["month"], "2025-06");
        assert!(value["date"].is_string());
        assert!(value["id"].is_string());
    }

    #[test]
    fn test_load_foreign_record() {
        let json = r#"{
            "id": "7b0c6c4e-3a52-4c39-9a51-0d8a3f8f6f10",
            "item": "EE",
            "amount": 3000,
            "date": "2025/6/1 10:00:00",
            "month": "2025-06"
        }"#;
        let entry: IncomeEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.category, "EE");
        assert_eq!(entry.amount, Amount::from_units(3000));
        assert_eq!(entry.recorded_at, "2025/6/1 10:00:00");
    }

    #[test]
    fn test_storage_keys() {
        assert_eq!(EntryKind::Expense.storage_key(), "expenseRecords");
        assert_eq!(EntryKind::Income.storage_key(), "incomeRecords");
    }
}
