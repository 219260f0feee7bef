//! Key-value store seam and the in-memory implementation.

use garden_error::GardenResult;
use parking_lot::Mutex;
use std::collections::HashMap;

/// A persistent string-to-string store, the analog of browser local storage.
///
/// Each call is atomic on its own. Callers never see a half-written value.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key was never written.
    fn get_item(&self, key: &str) -> GardenResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> GardenResult<()>;
}

/// Store that lives only as long as the process.
///
/// # Examples
///
/// ```
/// use garden_cache::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set_item("greeting", "hello").unwrap();
/// assert_eq!(store.get_item("greeting").unwrap().as_deref(), Some("hello"));
/// assert_eq!(store.get_item("missing").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Remove every key, like a visitor clearing site data.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        let count = entries.len();
        entries.clear();
        tracing::debug!(cleared = count, "Cleared memory store");
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> GardenResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> GardenResult<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
