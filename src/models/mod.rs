//! Core data models for the ledger
//!
//! This module contains the data structures that represent the ledger
//! domain: entries, amounts, months, and the fixed category registry.

pub mod amount;
pub mod category;
pub mod entry;
pub mod ids;
pub mod month;

pub use amount::{Amount, AmountParseError};
pub use category::{ExpenseCategory, ExpenseGroup, IncomeCategory};
pub use entry::{Entry, EntryKind, ExpenseEntry, IncomeEntry};
pub use ids::EntryId;
pub use month::{Month, MonthParseError};
