//! Key-value storage backends.
//!
//! Everything the builder persists is a string stored under one of a handful
//! of fixed keys (see [`keys`]). Two backends are provided:
//!
//! - [`MemoryStore`] - process-local map, used by tests and as a fake
//! - [`FileStore`] - one file per key inside a data directory

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Fixed storage keys.
pub mod keys {
    /// Snapshot of the in-progress draft.
    pub const BUILDER_STATE: &str = "builderState";
    /// JSON array of saved pass records.
    pub const SAVED_PASSES: &str = "savedPasses";
    /// Version counter for [`SAVED_PASSES`], bumped on every commit.
    pub const SAVED_PASSES_VERSION: &str = "savedPasses.version";
    /// Presence means the user is signed in.
    pub const AUTH_MARKER: &str = "passly_auth";
}

/// Errors raised by a storage backend.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// Filesystem failure while accessing a key.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// Key contains characters the backend cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// String key-value storage.
///
/// Implementations use interior mutability so a single instance can be
/// shared behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage handle shared between the store listener, repositories and
/// request handlers.
pub type SharedStorage = Arc<dyn KeyValueStore>;

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store already wrapped for sharing.
    #[must_use]
    pub fn shared() -> SharedStorage {
        Arc::new(Self::new())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// File-backed storage: each key is stored in `<dir>/<key>.json`.
///
/// Writes go to a temporary file first and are moved into place with a
/// rename, so readers never observe a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the data directory. The directory is created on first
    /// write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        key: key.to_owned(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(io_error(key))?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value).map_err(io_error(key))?;
        std::fs::rename(&temp_path, &path).map_err(io_error(key))?;

        tracing::trace!(key, path = %path.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key)(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get(keys::BUILDER_STATE).unwrap(), None);

        store.set(keys::BUILDER_STATE, "{\"a\":1}").unwrap();
        assert_eq!(
            store.get(keys::BUILDER_STATE).unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        store.set(keys::BUILDER_STATE, "{}").unwrap();
        assert_eq!(store.get(keys::BUILDER_STATE).unwrap().as_deref(), Some("{}"));

        store.remove(keys::BUILDER_STATE).unwrap();
        assert_eq!(store.get(keys::BUILDER_STATE).unwrap(), None);

        // Removing twice is fine.
        store.remove(keys::BUILDER_STATE).unwrap();
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let temp_dir = TempDir::new().unwrap();
        exercise(&FileStore::new(temp_dir.path()));
    }

    #[test]
    fn test_file_store_creates_directory_and_layout() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested").join("data"));

        store.set(keys::SAVED_PASSES_VERSION, "3").unwrap();

        let path = store.dir().join("savedPasses.version.json");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "3");
        assert!(!store.dir().join("savedPasses.version.json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_file_store_instances_share_state() {
        let temp_dir = TempDir::new().unwrap();
        let first = FileStore::new(temp_dir.path());
        let second = FileStore::new(temp_dir.path());

        first.set(keys::AUTH_MARKER, "user@example.com").unwrap();
        assert_eq!(
            second.get(keys::AUTH_MARKER).unwrap().as_deref(),
            Some("user@example.com")
        );
    }
}
