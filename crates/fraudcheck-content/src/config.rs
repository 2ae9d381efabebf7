//! Store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Typical browser `localStorage` budget per origin
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

const DATA_DIR_ENV: &str = "FRAUDCHECK_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Maximum bytes of stored content
    pub quota_bytes: usize,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("content.db"),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            log_filter: "info".to_string(),
        }
    }

    pub fn data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }

        dirs::data_local_dir()
            .map(|d| d.join("FraudCheck"))
            .unwrap_or_else(|| PathBuf::from(".fraudcheck"))
    }

    /// Open the durable store described by this config.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_store(&self) -> crate::Result<crate::ContentStore> {
        if let Some(parent) = self.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = fraudcheck_storage::Database::open(&self.database_path)?
            .with_quota(self.quota_bytes);

        tracing::info!(
            path = %self.database_path.display(),
            quota_bytes = self.quota_bytes,
            "Opened content database"
        );

        Ok(crate::ContentStore::new(db))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for the local data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
