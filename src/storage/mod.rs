pub mod migrations;
pub mod writer;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::errors::StorageError;
use crate::shared::paths::ensure_dir;

pub use migrations::SCHEMA_VERSION;
pub use writer::PersistWriter;

/// The four persisted collections, one file each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Tasks,
    Habits,
    Routine,
    Goals,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 4] = [
        CollectionKey::Tasks,
        CollectionKey::Habits,
        CollectionKey::Routine,
        CollectionKey::Goals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Tasks => "tasks",
            CollectionKey::Habits => "habits",
            CollectionKey::Routine => "routine",
            CollectionKey::Goals => "goals",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File-backed key-value store holding one JSON file per collection.
#[derive(Clone, Debug)]
pub struct CollectionStore {
    dir: PathBuf,
}

impl CollectionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: CollectionKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    fn temp_path_for(&self, key: CollectionKey) -> PathBuf {
        self.dir.join(format!("{}.tmp", key.file_name()))
    }

    /// Loads a collection, falling back to `seed` when the file is absent or
    /// cannot be decoded. Never fails.
    pub fn load<T, F>(&self, key: CollectionKey, seed: F) -> Vec<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        match self.try_load(key) {
            Ok(Some(items)) => items,
            Ok(None) => {
                tracing::info!(target: "storage", collection = %key, "No stored data, using seed");
                seed()
            }
            Err(e) => {
                tracing::warn!(
                    target: "storage",
                    collection = %key,
                    error = %e,
                    "Stored data unreadable, using seed"
                );
                seed()
            }
        }
    }

    /// Loads a collection. `Ok(None)` when nothing is stored yet.
    pub fn try_load<T: DeserializeOwned>(
        &self,
        key: CollectionKey,
    ) -> Result<Option<Vec<T>>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let decoded = migrations::decode::<T>(&content)?;

        if decoded.needs_rewrite() {
            tracing::info!(
                target: "storage",
                collection = %key,
                from_version = decoded.stored_version,
                to_version = SCHEMA_VERSION,
                "Migrating stored collection on next save"
            );
        }

        tracing::debug!(
            target: "storage",
            collection = %key,
            count = decoded.items.len(),
            "Loaded collection"
        );
        Ok(Some(decoded.items))
    }

    /// Serializes and overwrites the whole collection.
    pub fn save<T: Serialize>(&self, key: CollectionKey, items: &[T]) -> Result<(), StorageError> {
        let payload = migrations::encode(items)?;
        self.write_raw(key, &payload)
    }

    /// Atomically replaces the collection file with `payload`.
    pub fn write_raw(&self, key: CollectionKey, payload: &str) -> Result<(), StorageError> {
        ensure_dir(&self.dir)?;

        let tmp_path = self.temp_path_for(key);
        let path = self.path_for(key);

        std::fs::write(&tmp_path, payload)?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::trace!(
            target: "storage",
            collection = %key,
            path = %path.display(),
            bytes = payload.len(),
            "Wrote collection"
        );
        Ok(())
    }
}
