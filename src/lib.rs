//! fund-ledger - monthly income and expense ledger
//!
//! Records categorized income and expense entries tagged by month and
//! derives per-category totals, group subtotals, the balance carried over
//! from earlier months, and each month's closing balance.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Category registry, entries, amounts, months and ids
//! - `storage`: Ledger store and its key-value persistence port
//! - `services`: Aggregation engine, carry-over calculator, entry service
//! - `reports`: Monthly summary (terminal and CSV)
//! - `display`: Terminal formatting for entry lists and the registry
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fund_ledger::models::Month;
//! use fund_ledger::services::{carry_over, CarryOverMode};
//! use fund_ledger::storage::LedgerStore;
//!
//! let mut store = LedgerStore::in_memory();
//! let may = Month::parse("2025-05")?;
//! store.add_income("A", "10000", may)?;
//! store.add_expense(0, "3000", may)?;
//! let june = may.next();
//! assert_eq!(carry_over::carried_over(&store, june, CarryOverMode::Cumulative).to_string(), "¥7,000");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::LedgerError;
