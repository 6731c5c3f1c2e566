use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "grid-snake";
const STORE_FILE_NAME: &str = "storage.json";

/// Failure of the durable key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] io::Error),
    #[error("malformed stored data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable string key-value store, shaped like browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store. Cloning it models a restart that keeps the data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct StoreFile {
    entries: BTreeMap<String, String>,
}

/// Store backed by one JSON object file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the store at the platform-correct default location.
    #[must_use]
    pub fn open_default() -> Self {
        Self::new(default_store_path())
    }

    fn read_file(&self) -> Result<StoreFile, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(StoreFile::default());
            }
            Err(error) => return Err(error.into()),
        };

        Ok(serde_json::from_str(&raw)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_file()?.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut file = match self.read_file() {
            Ok(file) => file,
            Err(StorageError::Malformed(error)) => {
                log::warn!(
                    "replacing malformed store {}: {error}",
                    self.path.display()
                );
                StoreFile::default()
            }
            Err(error) => return Err(error),
        };
        file.entries.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Returns the platform-correct store file path.
#[must_use]
pub fn default_store_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(STORE_FILE_NAME);
    base
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{FileStore, KeyValueStore, MemoryStore, StorageError};

    #[test]
    fn memory_store_returns_what_was_set() {
        let mut store = MemoryStore::new();

        assert_eq!(store.get("k").expect("get should succeed"), None);
        store.set("k", "v").expect("set should succeed");
        assert_eq!(
            store.get("k").expect("get should succeed").as_deref(),
            Some("v")
        );
    }

    #[test]
    fn file_store_round_trip_survives_reopen() {
        let path = unique_test_path("round_trip");

        FileStore::new(&path)
            .set("hgscores", "[3,1]")
            .expect("write should succeed");
        let reopened = FileStore::new(&path);

        assert_eq!(
            reopened.get("hgscores").expect("read should succeed").as_deref(),
            Some("[3,1]")
        );
        cleanup_test_path(&path);
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let path = unique_test_path("other_keys");
        let mut store = FileStore::new(&path);

        store.set("a", "1").expect("write should succeed");
        store.set("b", "2").expect("write should succeed");

        assert_eq!(store.get("a").expect("read should succeed").as_deref(), Some("1"));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_file_reads_as_absent() {
        let store = FileStore::new(unique_test_path("missing"));

        assert_eq!(store.get("hgscores").expect("missing file is not an error"), None);
    }

    #[test]
    fn malformed_file_is_reported_then_replaced_on_write() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");
        let mut store = FileStore::new(&path);

        assert!(matches!(store.get("x"), Err(StorageError::Malformed(_))));

        store.set("x", "y").expect("write should replace malformed file");
        assert_eq!(store.get("x").expect("read should succeed").as_deref(), Some("y"));
        cleanup_test_path(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-storage-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
