//! JSON-file backend: one object mapping keys to their encoded values.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{StorageBackend, StorageError};

const APP_DIR: &str = "secretary";
const FILE_NAME: &str = "storage.json";

pub struct FileBackend {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<data_dir>/secretary/storage.json`, or the working directory when the
    /// platform has no data dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load for a write. A corrupt file is replaced rather than blocking every
    /// future write.
    fn load_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.load() {
            Err(StorageError::Serialization(e)) => {
                log::warn!(
                    "Discarding corrupt storage file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.load_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.load_for_write()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;
    use std::sync::Arc;

    #[test]
    fn test_values_survive_a_new_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = LocalStore::new(Arc::new(FileBackend::new(&path)));
        assert!(store.set("token", "abc123"));

        let reopened = LocalStore::new(Arc::new(FileBackend::new(&path)));
        assert_eq!(reopened.get("token", String::new()), "abc123");
    }

    #[test]
    fn test_corrupt_file_reads_default_and_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{{{ not json").unwrap();

        let store = LocalStore::new(Arc::new(FileBackend::new(&path)));
        assert_eq!(store.get("token", String::from("none")), "none");
        assert!(store.set("token", "fresh"));
        assert_eq!(store.get("token", String::new()), "fresh");
    }

    #[test]
    fn test_clear_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = LocalStore::new(Arc::new(FileBackend::new(&path)));

        assert!(store.set("a", &1));
        assert!(path.exists());
        assert!(store.clear());
        assert!(!path.exists());
        // Clearing twice is fine.
        assert!(store.clear());
    }

    #[test]
    fn test_unwritable_location_reports_false() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not dir").unwrap();

        let store = LocalStore::new(Arc::new(FileBackend::new(blocker.join("storage.json"))));
        assert!(!store.set("token", "x"));
        assert_eq!(store.get("token", String::from("d")), "d");
    }
}
