//! Persistence port
//!
//! The ledger store persists through a small key-value interface so the
//! backing medium can be swapped. Values are JSON documents stored verbatim.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

use super::file_io::{read_text, write_text_atomic};

/// Key-value storage used by the ledger store
pub trait PersistencePort {
    /// Read the value stored under `key`, or `None` if absent
    fn read(&self, key: &str) -> LedgerResult<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&mut self, key: &str, value: &str) -> LedgerResult<()>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the record files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl PersistencePort for JsonFileStore {
    fn read(&self, key: &str) -> LedgerResult<Option<String>> {
        let path = self.path_for(key);
        debug!(key, path = %path.display(), "reading records");
        read_text(path)
    }

    fn write(&mut self, key: &str, value: &str) -> LedgerResult<()> {
        let path = self.path_for(key);
        debug!(key, path = %path.display(), bytes = value.len(), "writing records");
        write_text_atomic(path, value)
    }
}

/// In-memory store
///
/// Clones share the same contents, so a test can keep a handle and inspect
/// what the ledger store wrote. Writes can be made to fail on demand.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, as if written by an earlier session
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Current value under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl PersistencePort for MemoryStore {
    fn read(&self, key: &str) -> LedgerResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> LedgerResult<()> {
        if self.fail_writes.get() {
            return Err(LedgerError::Storage(format!(
                "Write to {} rejected by memory store",
                key
            )));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
