//! File-backed key-value store.
//!
//! Keeps every key in one JSON object on disk so cached data survives restarts,
//! the way browser local storage survives page reloads.

use crate::KeyValueStore;
use garden_error::{GardenResult, JsonError, StorageError, StorageErrorKind};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// JSON-file key-value store.
///
/// # Features
///
/// - **Lazy creation**: a missing file is an empty store; the file appears on first write
/// - **Atomic writes**: uses temp file + rename so a crash never leaves a torn file
/// - **Corruption tolerant**: an unreadable object is logged and treated as empty
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or prepare to create) the store at `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the file exists but
    /// cannot be read.
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> GardenResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&path, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Store file does not exist yet, starting empty");
                BTreeMap::new()
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        tracing::info!(keys = entries.len(), "Opened file store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(path: &Path, content: &str) -> BTreeMap<String, String> {
        match serde_json::from_str(content) {
            Ok(entries) => entries,
            Err(e) => {
                let err = StorageError::new(StorageErrorKind::Corrupt(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
                tracing::warn!(error = %err, "Ignoring unreadable store file");
                BTreeMap::new()
            }
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> GardenResult<()> {
        let content = serde_json::to_string_pretty(entries).map_err(JsonError::from)?;

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        std::fs::write(&temp_path, content).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> GardenResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> GardenResult<()> {
        // Hold the lock across the write so files land in the same order as updates.
        let mut entries = self.entries.lock();
        let previous = entries.insert(key.to_string(), value.to_string());

        if let Err(e) = self.persist(&entries) {
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
            return Err(e);
        }

        tracing::trace!(key, "Persisted store entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let store = FileStore::open(dir.path().join("cache.json"))?;

        assert_eq!(store.get_item("anything")?, None);
        assert!(!store.path().exists());
        Ok(())
    }

    #[test]
    fn test_creates_parent_directories() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("deeper").join("cache.json");
        let store = FileStore::open(&path)?;

        store.set_item("k", "v")?;

        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn test_no_temp_file_left_behind() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let store = FileStore::open(dir.path().join("cache.json"))?;

        store.set_item("k", "v")?;

        assert!(!dir.path().join("cache.json.tmp").exists());
        Ok(())
    }
}
