//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod income;
pub mod month;
pub mod summary;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use month::resolve_month;
pub use summary::{handle_summary_command, SummaryArgs};
