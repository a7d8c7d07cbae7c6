//! Storage layer for the ledger
//!
//! The ledger store keeps entries in memory and writes them through a
//! key-value persistence port. The file-backed port uses atomic JSON writes.

pub mod file_io;
pub mod ledger;
pub mod port;

pub use file_io::{read_json, read_text, write_json_atomic, write_text_atomic};
pub use ledger::{EditedEntry, EntryCollection, LedgerStore};
pub use port::{JsonFileStore, MemoryStore, PersistencePort};

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Open the file-backed ledger under the configured data directory
pub fn open_ledger(paths: &LedgerPaths) -> Result<LedgerStore, LedgerError> {
    paths.ensure_directories()?;
    LedgerStore::load(Box::new(JsonFileStore::new(paths.data_dir())))
}
