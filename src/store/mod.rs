//! Persisted search filter storage.
//!
//! A store owns a single named slot. When the underlying medium is
//! unavailable, reads return `None` and writes are dropped; callers never
//! see a storage failure.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileFilterStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageFilterStore;

use crate::error::StorageError;
use log::{debug, warn};
use std::cell::RefCell;

/// Durable slot for the active search term.
pub trait FilterStore {
    /// Returns the stored term, or `None` if absent or unreadable.
    fn get(&self) -> Option<String>;
    /// Stores `term`, overwriting any prior value.
    fn set(&self, term: &str);
    /// Removes the stored term.
    fn clear(&self);
}

/// Maps an empty term to "no filter".
pub fn normalize_term(term: Option<String>) -> Option<String> {
    term.filter(|t| !t.is_empty())
}

/// Folds a failed read of the medium into an absent term.
pub(crate) fn read_or_absent(read: Result<Option<String>, StorageError>) -> Option<String> {
    read.unwrap_or_else(|e| {
        debug!("Reading search term as absent: {}", e);
        None
    })
}

/// Logs a failed write of the medium and drops it.
pub(crate) fn drop_failed_write(action: &str, write: Result<(), StorageError>) {
    if let Err(e) = write {
        warn!("Failed to {} search term: {}", action, e);
    }
}

/// Process-local store. Can also stand in for an inaccessible medium.
#[derive(Debug)]
pub struct MemoryFilterStore {
    slot: RefCell<Option<String>>,
    available: bool,
}

impl Default for MemoryFilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFilterStore {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
            available: true,
        }
    }

    pub fn with_term(term: &str) -> Self {
        let store = Self::new();
        store.set(term);
        store
    }

    /// A store whose medium cannot be reached.
    pub fn unavailable() -> Self {
        Self {
            slot: RefCell::new(None),
            available: false,
        }
    }
}

impl FilterStore for MemoryFilterStore {
    fn get(&self) -> Option<String> {
        if !self.available {
            debug!("Filter storage unavailable, reading as absent");
            return None;
        }
        self.slot.borrow().clone()
    }

    fn set(&self, term: &str) {
        if self.available {
            *self.slot.borrow_mut() = Some(term.to_string());
        }
    }

    fn clear(&self) {
        if self.available {
            *self.slot.borrow_mut() = None;
        }
    }
}
