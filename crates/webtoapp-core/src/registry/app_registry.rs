//! JSON-backed registry of generated apps.

use super::record::AppRecord;
use crate::metadata::{atomic_read_json, atomic_write_json, FileLock};
use crate::Result;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// In-memory form of the registry document.
///
/// Behaves like an insertion-ordered map keyed by app name: overwriting an
/// existing name keeps its position, new names are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryDocument {
    entries: Vec<(String, AppRecord)>,
}

impl RegistryDocument {
    /// Insert or overwrite the entry for `name`. Returns the replaced record.
    pub fn insert(&mut self, name: String, record: AppRecord) -> Option<AppRecord> {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, record)),
            None => {
                self.entries.push((name, record));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<AppRecord> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&AppRecord> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, record)| record)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn records(&self) -> impl Iterator<Item = &AppRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RegistryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RegistryDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // `preserve_order` keeps the map in document order.
        let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut entries = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let record: AppRecord = serde_json::from_value(value).map_err(|e| {
                <D::Error as serde::de::Error>::custom(format!("entry '{}': {}", name, e))
            })?;
            entries.push((name, record));
        }
        Ok(Self { entries })
    }
}

/// Registry persisted as a single JSON document.
///
/// Every mutation is a locked read-modify-write of the whole document.
pub struct AppRegistry {
    path: PathBuf,
    lock_path: PathBuf,
}

impl AppRegistry {
    /// Create a registry handle for the document at `path`.
    ///
    /// Nothing is read or written until the first operation.
    pub fn new(path: impl AsRef<Path>, lock_path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock_path: lock_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the registry document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document. A missing file is an empty registry.
    pub fn load(&self) -> Result<RegistryDocument> {
        Ok(atomic_read_json(&self.path)?.unwrap_or_default())
    }

    fn save(&self, document: &RegistryDocument) -> Result<()> {
        atomic_write_json(&self.path, document, true)
    }

    /// Insert or overwrite the record under its name.
    ///
    /// Returns the record that was replaced, if any.
    pub fn create(&self, record: AppRecord) -> Result<Option<AppRecord>> {
        let _lock = FileLock::acquire(&self.lock_path)?;
        let mut document = self.load()?;

        let name = record.name.clone();
        let replaced = document.insert(name.clone(), record);
        self.save(&document)?;

        if replaced.is_some() {
            info!("Overwrote registry entry for {}", name);
        } else {
            debug!("Added registry entry for {}", name);
        }
        Ok(replaced)
    }

    /// All records in document order.
    pub fn list(&self) -> Result<Vec<AppRecord>> {
        Ok(self.load()?.records().cloned().collect())
    }

    /// Look up a record by name.
    pub fn get(&self, name: &str) -> Result<Option<AppRecord>> {
        Ok(self.load()?.get(name).cloned())
    }

    /// Remove the entry for `name` and rewrite the document.
    ///
    /// Returns `None` and leaves the document untouched when no entry exists.
    pub fn remove(&self, name: &str) -> Result<Option<AppRecord>> {
        let _lock = FileLock::acquire(&self.lock_path)?;
        let mut document = self.load()?;

        let removed = document.remove(name);
        if removed.is_some() {
            self.save(&document)?;
            debug!("Removed registry entry for {}", name);
        }
        Ok(removed)
    }
}
