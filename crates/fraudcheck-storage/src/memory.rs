//! In-memory storage
//!
//! Used by tests and by callers that have no durable backend. Supports a
//! byte quota and a switch that makes every write fail, so error paths can
//! be exercised without a real browser.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::backend::KeyValueStorage;
use crate::error::StorageError;
use crate::Result;

#[derive(Default)]
struct Inner {
    items: RwLock<BTreeMap<String, String>>,
    quota: Option<usize>,
    fail_writes: AtomicBool,
}

#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(bytes: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                quota: Some(bytes),
                ..Inner::default()
            }),
        }
    }

    /// Make every subsequent write fail with `QuotaExceeded` until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Store `value` bypassing the quota and failure switch.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.inner
            .items
            .write()
            .insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.inner.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.read().is_empty()
    }
}

fn used_bytes_excluding(items: &BTreeMap<String, String>, key: &str) -> usize {
    items
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| crate::entry_size(k, v))
        .sum()
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let limit = self.inner.quota.unwrap_or(usize::MAX);

        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                limit,
            });
        }

        // Check and insert under one guard so concurrent writers cannot
        // overshoot the quota together
        let mut items = self.inner.items.write();
        if let Some(limit) = self.inner.quota {
            let total = used_bytes_excluding(&items, key) + crate::entry_size(key, value);
            if total > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.inner.items.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.set_item("homeData", "{}").unwrap();
        assert_eq!(storage.get_item("homeData").unwrap().as_deref(), Some("{}"));
        assert_eq!(storage.get_item("missing").unwrap(), None);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        other.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_quota() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("ab", "12345678").unwrap();

        let err = storage.set_item("c", "d").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));

        // Overwriting an existing key only counts the replacement
        storage.set_item("ab", "87654321").unwrap();
        assert_eq!(storage.get_item("ab").unwrap().as_deref(), Some("87654321"));
    }

    #[test]
    fn test_concurrent_writers_respect_quota() {
        // Room for exactly four entries of 10 bytes
        let storage = MemoryStorage::with_quota(40);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let storage = storage.clone();
                std::thread::spawn(move || {
                    let key = format!("k{:02}", i);
                    storage.set_item(&key, "1234567").is_ok()
                })
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 4);
        assert_eq!(storage.len(), 4);
        let used: usize = storage.entries().unwrap().iter().map(|e| e.size).sum();
        assert!(used <= 40);
    }

    #[test]
    fn test_fail_writes_switch() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        assert!(storage.set_item("a", "1").is_err());
        assert_eq!(storage.get_item("a").unwrap(), None);

        storage.set_fail_writes(false);
        storage.set_item("a", "1").unwrap();
    }

    #[test]
    fn test_keys_and_entries_sorted() {
        let storage = MemoryStorage::new();
        storage.insert_raw("b", "22");
        storage.insert_raw("a", "1");

        assert_eq!(storage.keys().unwrap(), vec!["a", "b"]);
        let entries = storage.entries().unwrap();
        assert_eq!(entries[1].size, 2);
        assert!(entries[1].updated_at.is_none());
    }
}
