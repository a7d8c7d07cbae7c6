//! Display formatting for terminal output
//!
//! Entry history tables and the category registry listing.

pub mod category;
pub mod entry;

pub use category::format_registry;
pub use entry::{format_expense_list, format_income_list};
