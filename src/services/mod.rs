//! Service layer for the ledger
//!
//! Business logic on top of the ledger store: category validation for new
//! entries, the aggregation engine, and the carry-over calculator.

pub mod aggregation;
pub mod carry_over;
pub mod entry;

pub use carry_over::CarryOverMode;
pub use entry::{EntryFilter, EntryService};
