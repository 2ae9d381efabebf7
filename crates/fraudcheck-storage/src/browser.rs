//! Browser `localStorage` backend for wasm builds

use crate::backend::KeyValueStorage;
use crate::error::StorageError;
use crate::Result;

/// `window.localStorage` of the current browsing context.
///
/// Values are looked up on every call; the handle itself is not cached
/// because `web_sys::Storage` is not `Send`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        // The browser does not expose its quota, so the limit is unknown here
        Self::storage()?.set_item(key, value).map_err(|e| {
            tracing::warn!(key = %key, error = ?e, "localStorage rejected write");
            StorageError::WriteRejected(format!("{key}: {e:?}"))
        })
    }

    fn keys(&self) -> Result<Vec<String>> {
        let storage = Self::storage()?;
        let len = storage
            .length()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?;

        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Ok(Some(key)) = storage.key(index) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}
