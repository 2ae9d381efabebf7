//! SQLite-backed durable storage

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::backend::{KeyValueStorage, StoredEntry};
use crate::error::StorageError;
use crate::migrations::run_migrations;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
    /// Maximum bytes across all entries, `None` for unlimited
    quota: Option<usize>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode so readers in other processes don't block on the admin tool
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            quota: None,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            quota: None,
        })
    }

    /// Reject writes that would grow the stored total past `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn quota(&self) -> Option<usize> {
        self.quota
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Last write time for `key`, if it is stored.
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let raw: Option<String> = self.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT updated_at FROM content_records WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })?;

        Ok(raw.and_then(|s| parse_timestamp(&s)))
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

impl KeyValueStorage for Database {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM content_records WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        let quota = self.quota;

        self.transaction(|conn| {
            if let Some(limit) = quota {
                let others: i64 = conn.query_row(
                    "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
                     FROM content_records WHERE key != ?1",
                    [key],
                    |row| row.get(0),
                )?;
                let total = others as usize + crate::entry_size(key, value);
                if total > limit {
                    return Err(StorageError::QuotaExceeded {
                        key: key.to_string(),
                        limit,
                    });
                }
            }

            conn.execute(
                "INSERT OR REPLACE INTO content_records (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })?;

        tracing::debug!(key = %key, bytes = value.len(), "Stored content record");
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM content_records ORDER BY key")?;
            let keys = stmt
                .query_map([], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?;
            Ok(keys)
        })
    }

    fn entries(&self) -> Result<Vec<StoredEntry>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT key, LENGTH(CAST(value AS BLOB)), updated_at
                 FROM content_records ORDER BY key",
            )?;
            let entries = stmt
                .query_map([], |row| {
                    let size: i64 = row.get(1)?;
                    let updated_str: String = row.get(2)?;
                    Ok(StoredEntry {
                        key: row.get(0)?,
                        size: size as usize,
                        updated_at: parse_timestamp(&updated_str),
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(entries)
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            quota: self.quota,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let count: i32 =
                conn.query_row("SELECT COUNT(*) FROM content_records", [], |row| row.get(0))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_get_missing_key() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_item("homeData").unwrap(), None);
        assert_eq!(db.updated_at("homeData").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set_item("homeData", "{\"a\":1}").unwrap();
        db.set_item("homeData", "{\"a\":2}").unwrap();

        assert_eq!(db.get_item("homeData").unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(db.updated_at("homeData").unwrap().is_some());
        assert_eq!(db.keys().unwrap(), vec!["homeData".to_string()]);
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let db = Database::open_in_memory().unwrap().with_quota(32);
        db.set_item("k", "small").unwrap();

        let err = db.set_item("big", &"x".repeat(64)).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 32, .. }));

        // The rejected write leaves earlier data alone
        assert_eq!(db.get_item("k").unwrap().as_deref(), Some("small"));
        assert_eq!(db.get_item("big").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let db = Database::open_in_memory().unwrap().with_quota(20);
        db.set_item("key", &"a".repeat(15)).unwrap();
        // Replacing the same key only counts the new value
        db.set_item("key", &"b".repeat(16)).unwrap();
        assert_eq!(db.get_item("key").unwrap().unwrap().len(), 16);
    }

    #[test]
    fn test_entries_report_sizes() {
        let db = Database::open_in_memory().unwrap();
        db.set_item("b", "héllo").unwrap();
        db.set_item("a", "hi").unwrap();

        let entries = db.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "a");
        assert_eq!(entries[0].size, 2);
        assert_eq!(entries[1].size, "héllo".len());
        assert!(entries[1].updated_at.is_some());
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = std::env::temp_dir().join(format!(
            "fraudcheck-storage-test-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("content.db");
        let _ = std::fs::remove_file(&path);

        {
            let db = Database::open(&path).unwrap();
            db.set_item("articleSettings", "{}").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_item("articleSettings").unwrap().as_deref(), Some("{}"));

        drop(db);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
