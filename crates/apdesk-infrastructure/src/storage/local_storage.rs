//! Persistent string key/value storage.
//!
//! A flat TOML table of string values, the on-disk counterpart of a browser's
//! `localStorage`. Writes replace a file that no longer parses instead of
//! failing on it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::atomic_toml::{AtomicTomlError, AtomicTomlFile};

type Entries = BTreeMap<String, String>;

/// Key/value store backed by a single TOML file.
pub struct LocalStorage {
    file: AtomicTomlFile<Entries>,
}

impl LocalStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, AtomicTomlError> {
        Ok(self
            .file
            .load()?
            .and_then(|mut entries| entries.remove(key)))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), AtomicTomlError> {
        self.file.update_or_reset(Entries::new(), |entries| {
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    /// Removes `key`. The file is left untouched when the key is absent.
    pub fn remove_item(&self, key: &str) -> Result<(), AtomicTomlError> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update_or_reset(Entries::new(), |entries| {
            entries.remove(key);
            Ok(())
        })
    }
}
