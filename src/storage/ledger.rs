//! Ledger store
//!
//! Holds the full history of expense and income entries and is the only
//! place entries are created, changed, or removed. Every mutation writes the
//! complete state back through the persistence port.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Amount, Entry, EntryId, EntryKind, ExpenseEntry, IncomeEntry, Month};

use super::port::{MemoryStore, PersistencePort};

/// An ordered collection of entries of one kind
///
/// Entries keep insertion order; every query preserves it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryCollection<R> {
    entries: Vec<Entry<R>>,
}

impl<R> Default for EntryCollection<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R> EntryCollection<R> {
    /// Build a collection from entries in insertion order
    pub fn from_entries(entries: Vec<Entry<R>>) -> Self {
        Self { entries }
    }

    /// All entries in insertion order
    pub fn all(&self) -> &[Entry<R>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by id
    pub fn get(&self, id: &EntryId) -> Option<&Entry<R>> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Entries tagged with exactly `month`
    pub fn for_month(&self, month: Month) -> Vec<&Entry<R>> {
        self.entries.iter().filter(|e| e.month == month).collect()
    }

    /// Entries tagged with any month strictly before `month`
    pub fn before(&self, month: Month) -> Vec<&Entry<R>> {
        self.entries.iter().filter(|e| e.month < month).collect()
    }

    /// Entries whose id starts with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&Entry<R>> {
        self.entries
            .iter()
            .filter(|e| e.id.matches_prefix(prefix))
            .collect()
    }

    fn push(&mut self, entry: Entry<R>) {
        self.entries.push(entry);
    }

    fn revise(&mut self, id: &EntryId, amount: Amount, month: Month) -> Option<&Entry<R>> {
        let entry = self.entries.iter_mut().find(|e| &e.id == id)?;
        entry.revise(amount, month);
        Some(entry)
    }

    fn remove(&mut self, id: &EntryId) -> Option<Entry<R>> {
        let position = self.entries.iter().position(|e| &e.id == id)?;
        Some(self.entries.remove(position))
    }
}

impl<R: Serialize> EntryCollection<R> {
    fn to_json(&self) -> LedgerResult<String> {
        serde_json::to_string(&self.entries).map_err(LedgerError::from)
    }
}

impl<R: DeserializeOwned> EntryCollection<R> {
    fn from_json(key: &str, json: &str) -> LedgerResult<Self> {
        let entries = serde_json::from_str(json)
            .map_err(|e| LedgerError::Storage(format!("Failed to parse {}: {}", key, e)))?;
        Ok(Self { entries })
    }
}

/// The result of an edit, carrying the updated entry of either kind
#[derive(Debug, Clone, PartialEq)]
pub enum EditedEntry {
    Expense(ExpenseEntry),
    Income(IncomeEntry),
}

impl EditedEntry {
    pub fn id(&self) -> &EntryId {
        match self {
            EditedEntry::Expense(e) => &e.id,
            EditedEntry::Income(e) => &e.id,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            EditedEntry::Expense(e) => e.amount,
            EditedEntry::Income(e) => e.amount,
        }
    }

    pub fn month(&self) -> Month {
        match self {
            EditedEntry::Expense(e) => e.month,
            EditedEntry::Income(e) => e.month,
        }
    }
}

/// Owner of both entry collections and of the persistence port
pub struct LedgerStore {
    port: Box<dyn PersistencePort>,
    expenses: EntryCollection<i64>,
    income: EntryCollection<String>,
    /// Set when the last write failed and storage lags memory
    dirty: bool,
}

impl LedgerStore {
    /// Load both collections from the port
    ///
    /// A missing key is an empty collection. A value that does not parse is
    /// an error: nothing is overwritten.
    pub fn load(port: Box<dyn PersistencePort>) -> LedgerResult<Self> {
        let expenses = Self::load_collection(port.as_ref(), EntryKind::Expense)?;
        let income = Self::load_collection(port.as_ref(), EntryKind::Income)?;

        debug!(
            expenses = expenses.len(),
            income = income.len(),
            "loaded ledger"
        );

        Ok(Self {
            port,
            expenses,
            income,
            dirty: false,
        })
    }

    /// An empty store backed by memory only
    pub fn in_memory() -> Self {
        Self {
            port: Box::new(MemoryStore::new()),
            expenses: EntryCollection::default(),
            income: EntryCollection::default(),
            dirty: false,
        }
    }

    fn load_collection<R: DeserializeOwned>(
        port: &dyn PersistencePort,
        kind: EntryKind,
    ) -> LedgerResult<EntryCollection<R>> {
        let key = kind.storage_key();
        match port.read(key)? {
            Some(json) => EntryCollection::from_json(key, &json),
            None => Ok(EntryCollection::default()),
        }
    }

    /// Expense entries
    pub fn expenses(&self) -> &EntryCollection<i64> {
        &self.expenses
    }

    /// Income entries
    pub fn income(&self) -> &EntryCollection<String> {
        &self.income
    }

    /// Record a new expense
    ///
    /// Fails with `InvalidAmount` if `amount` is empty or not a number; the
    /// store is left untouched in that case.
    pub fn add_expense(
        &mut self,
        category: i64,
        amount: &str,
        month: Month,
    ) -> LedgerResult<ExpenseEntry> {
        let amount = parse_amount(amount)?;
        let entry = ExpenseEntry::new(category, amount, month);
        self.expenses.push(entry.clone());

        info!(id = %entry.id, category, amount = %amount, %month, "added expense");
        self.persist();
        Ok(entry)
    }

    /// Record a new income entry
    ///
    /// Same amount rule as [`LedgerStore::add_expense`].
    pub fn add_income(
        &mut self,
        key: impl Into<String>,
        amount: &str,
        month: Month,
    ) -> LedgerResult<IncomeEntry> {
        let amount = parse_amount(amount)?;
        let entry = IncomeEntry::new(key.into(), amount, month);
        self.income.push(entry.clone());

        info!(id = %entry.id, category = %entry.category, amount = %amount, %month, "added income");
        self.persist();
        Ok(entry)
    }

    /// Change the amount and month of an existing entry
    ///
    /// The amount is validated before the lookup, so an invalid amount is
    /// reported even for an unknown id. The category is never altered.
    pub fn edit(
        &mut self,
        kind: EntryKind,
        id: &EntryId,
        amount: &str,
        month: Month,
    ) -> LedgerResult<EditedEntry> {
        let amount = parse_amount(amount)?;

        let edited = match kind {
            EntryKind::Expense => self
                .expenses
                .revise(id, amount, month)
                .cloned()
                .map(EditedEntry::Expense)
                .ok_or_else(|| LedgerError::expense_not_found(id.as_str()))?,
            EntryKind::Income => self
                .income
                .revise(id, amount, month)
                .cloned()
                .map(EditedEntry::Income)
                .ok_or_else(|| LedgerError::income_not_found(id.as_str()))?,
        };

        info!(%kind, %id, amount = %amount, %month, "edited entry");
        self.persist();
        Ok(edited)
    }

    /// Remove an entry
    ///
    /// Returns whether an entry was removed. An unknown id is not an error.
    pub fn delete(&mut self, kind: EntryKind, id: &EntryId) -> bool {
        let removed = match kind {
            EntryKind::Expense => self.expenses.remove(id).is_some(),
            EntryKind::Income => self.income.remove(id).is_some(),
        };

        if removed {
            info!(%kind, %id, "deleted entry");
        } else {
            warn!(%kind, %id, "delete target not found");
        }
        self.persist();
        removed
    }

    /// Whether the last write failed, leaving storage behind memory
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the full state and report any failure
    pub fn flush(&mut self) -> LedgerResult<()> {
        let result = self.write_all();
        self.dirty = result.is_err();
        result
    }

    // Write failures are logged, not returned: the in-memory change stands and
    // the next successful write brings storage back in line.
    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            error!(error = %e, "failed to persist ledger");
        }
    }

    fn write_all(&mut self) -> LedgerResult<()> {
        let expenses = self.expenses.to_json()?;
        let income = self.income.to_json()?;
        self.port.write(EntryKind::Expense.storage_key(), &expenses)?;
        self.port.write(EntryKind::Income.storage_key(), &income)?;
        Ok(())
    }
}

fn parse_amount(text: &str) -> LedgerResult<Amount> {
    Amount::parse(text).map_err(|_| LedgerError::InvalidAmount(text.to_string()))
}
