//! File-backed filter store for native builds.
//!
//! Slots live in a small JSON object so several keys can share one file:
//! - Linux: ~/.local/share/pixly-client/storage.json
//! - macOS: ~/Library/Application Support/pixly-client/storage.json
//! - Windows: %APPDATA%\pixly-client\storage.json

use super::{FilterStore, drop_failed_write, read_or_absent};
use crate::config::ClientConfig;
use crate::error::StorageError;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

type Slots = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct FileFilterStore {
    path: PathBuf,
    key: String,
}

impl FileFilterStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Store for slot `key` in the user data directory.
    ///
    /// Returns `None` when no data directory can be determined.
    pub fn in_user_data_dir(key: impl Into<String>) -> Option<Self> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("pixly-client");
        path.push("storage.json");
        Some(Self::new(path, key))
    }

    /// Store for the configured slot in the user data directory.
    pub fn from_config(config: &ClientConfig) -> Option<Self> {
        Self::in_user_data_dir(config.storage_key.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_slots(&self) -> Result<Slots, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Slots::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Slots::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_slots(&self, slots: &Slots) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(slots)?)?;
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Slots)) -> Result<(), StorageError> {
        let mut slots = self.read_slots()?;
        f(&mut slots);
        self.write_slots(&slots)
    }
}

impl FilterStore for FileFilterStore {
    fn get(&self) -> Option<String> {
        read_or_absent(self.read_slots().map(|mut slots| slots.remove(&self.key)))
    }

    fn set(&self, term: &str) {
        let key = self.key.clone();
        drop_failed_write(
            "persist",
            self.modify(|slots| {
                slots.insert(key, term.to_string());
            }),
        );
    }

    fn clear(&self) {
        drop_failed_write(
            "clear",
            self.modify(|slots| {
                slots.remove(&self.key);
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileFilterStore::new(&path, "search").set("sunset");
        let reopened = FileFilterStore::new(&path, "search");
        assert_eq!(reopened.get().as_deref(), Some("sunset"));

        reopened.clear();
        assert_eq!(FileFilterStore::new(&path, "search").get(), None);
    }

    #[test]
    fn clear_leaves_other_slots_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let search = FileFilterStore::new(&path, "search");
        let other = FileFilterStore::new(&path, "theme");

        search.set("iso800");
        other.set("dark");
        search.clear();

        assert_eq!(search.get(), None);
        assert_eq!(other.get().as_deref(), Some("dark"));
    }

    #[test]
    fn unreadable_medium_degrades_to_absent() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every read and write fail.
        let store = FileFilterStore::new(dir.path(), "search");

        store.set("sunset");
        assert_eq!(store.get(), None);
        store.clear();
    }

    #[test]
    fn configured_slot_name_is_used() {
        let config = ClientConfig {
            storage_key: "gallery-search".to_string(),
            ..ClientConfig::default()
        };
        let store = FileFilterStore::from_config(&config).unwrap();

        assert_eq!(store.key(), "gallery-search");
        assert!(store.path().ends_with("pixly-client/storage.json"));
    }

    #[test]
    fn corrupt_file_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ broken").unwrap();

        assert_eq!(FileFilterStore::new(&path, "search").get(), None);
    }
}
