//! Entry identifiers
//!
//! Entries are identified by a generated id that never changes, so an id held
//! by the caller stays valid across deletions of other entries.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of characters shown when an id is displayed in lists
pub const SHORT_ID_LEN: usize = 8;

/// Stable identity of a ledger entry
///
/// New ids are random v4 UUIDs. Ids already present in storage are kept
/// verbatim, whatever their shape. A numeric id is read as its decimal
/// text and written back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form used in list output
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_ID_LEN) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }

    /// Check whether this id starts with the given prefix
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.0.starts_with(prefix)
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntryIdVisitor)
    }
}

struct EntryIdVisitor;

impl<'de> Visitor<'de> for EntryIdVisitor {
    type Value = EntryId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or numeric id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<EntryId, E> {
        Ok(EntryId(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<EntryId, E> {
        Ok(EntryId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntryId, E> {
        Ok(EntryId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntryId, E> {
        Ok(EntryId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<EntryId, E> {
        Ok(EntryId(v.to_string()))
    }
}
