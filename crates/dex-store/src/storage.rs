//! String key-value storage backends.
//!
//! The stores persist through the [`KeyValueStore`] trait so tests and
//! alternative frontends can inject their own backend:
//!
//! - [`JsonFileStore`] - one JSON object file on disk
//! - [`MemoryStore`] - process-local map, nothing persisted

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use dex_core::FxHashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::StorageError;

/// A string-to-string store with whole-value reads and writes.
///
/// Methods take `&self`; backends provide their own interior mutability.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Stores every key in one JSON object file.
///
/// Each write rewrites the whole file through a temporary sibling and a
/// rename, so a crash mid-write leaves the previous contents intact. Parent
/// directories are created on first write.
///
/// # Examples
///
/// ```
/// use dex_store::{JsonFileStore, KeyValueStore};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("data.json")).unwrap();
/// let store = JsonFileStore::new(path);
///
/// store.set("greeting", "hello").unwrap();
/// assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    path: Utf8PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Creates a store at `favorites.json` in the platform data directory.
    pub fn in_data_dir() -> Result<Self, StorageError> {
        Ok(Self::new(default_favorites_path()?))
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|source| StorageError::corrupt(&self.path, source)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(StorageError::io(&self.path, err)),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
            }
        }

        let body = serde_json::to_string_pretty(map)
            .map_err(|source| StorageError::corrupt(&self.path, source))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|err| StorageError::io(&tmp, err))?;
        fs::rename(&tmp, &self.path).map_err(|err| StorageError::io(&self.path, err))?;

        debug!(path = %self.path, keys = map.len(), "Wrote storage file");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock();
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        // A corrupt file is replaced rather than blocking every write.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut map = self.read_map().unwrap_or_default();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Process-local storage. Used by tests and as a fallback when no data
/// directory exists.
///
/// # Examples
///
/// ```
/// use dex_store::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// assert_eq!(store.get("k").unwrap(), None);
/// store.set("k", "v").unwrap();
/// assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .insert(key.to_owned(), value.to_owned());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// `favorites.json` under the platform data directory, in a `pokedex`
/// subdirectory.
pub fn default_favorites_path() -> Result<Utf8PathBuf, StorageError> {
    let dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
    let path = dir.join("pokedex").join("favorites.json");
    Utf8PathBuf::from_path_buf(path).map_err(StorageError::NonUtf8Path)
}
