//! Browser `localStorage` filter store.

use super::{FilterStore, drop_failed_write, read_or_absent};
use crate::config::{ClientConfig, SEARCH_STORAGE_KEY};
use crate::error::StorageError;
use wasm_bindgen::JsValue;
use web_sys::Storage;

#[derive(Debug, Clone)]
pub struct LocalStorageFilterStore {
    key: String,
}

impl Default for LocalStorageFilterStore {
    fn default() -> Self {
        Self::new(SEARCH_STORAGE_KEY)
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", err))
}

impl LocalStorageFilterStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.storage_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fails when there is no window or storage is disabled.
    fn storage(&self) -> Result<Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl FilterStore for LocalStorageFilterStore {
    fn get(&self) -> Option<String> {
        read_or_absent(
            self.storage()
                .and_then(|storage| storage.get_item(&self.key).map_err(js_error)),
        )
    }

    fn set(&self, term: &str) {
        drop_failed_write(
            "persist",
            self.storage()
                .and_then(|storage| storage.set_item(&self.key, term).map_err(js_error)),
        );
    }

    fn clear(&self) {
        drop_failed_write(
            "clear",
            self.storage()
                .and_then(|storage| storage.remove_item(&self.key).map_err(js_error)),
        );
    }
}
