//! Reports module for the ledger
//!
//! Provides the monthly summary with terminal and CSV output.

pub mod monthly;

pub use monthly::MonthlyReport;
