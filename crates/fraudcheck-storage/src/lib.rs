//! Fraud Check Storage Layer
//!
//! Durable key-value storage for site content records.
//! Values are opaque text; callers own the encoding.

mod backend;
#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(not(target_arch = "wasm32"))]
mod database;
mod error;
mod memory;
#[cfg(not(target_arch = "wasm32"))]
mod migrations;

pub use backend::{KeyValueStorage, StoredEntry};
#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStorage;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Bytes an entry counts against a storage quota.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}
