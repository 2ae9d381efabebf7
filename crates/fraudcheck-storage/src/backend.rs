//! The storage capability every backend implements

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Result;

/// Text-valued key-value storage scoped to one site.
///
/// Mirrors the browser `localStorage` contract: synchronous access, string
/// keys and values, no partial writes.
pub trait KeyValueStorage: Send + Sync {
    /// Returns `None` when nothing is stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Stored keys in ascending order.
    fn keys(&self) -> Result<Vec<String>>;

    /// Stored entries with their sizes. Backends that track write times
    /// override this to fill in `updated_at`.
    fn entries(&self) -> Result<Vec<StoredEntry>> {
        let mut entries = Vec::new();
        for key in self.keys()? {
            if let Some(value) = self.get_item(&key)? {
                entries.push(StoredEntry {
                    size: value.len(),
                    key,
                    updated_at: None,
                });
            }
        }
        Ok(entries)
    }
}

/// Metadata about one stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredEntry {
    pub key: String,
    /// Size of the stored text in bytes
    pub size: usize,
    pub updated_at: Option<DateTime<Utc>>,
}
