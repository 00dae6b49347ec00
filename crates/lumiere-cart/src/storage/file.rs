//! # File Storage
//!
//! One JSON file per key under a data directory:
//!
//! ```text
//! ~/.local/share/lumiere/
//! └── cart-storage.json      ◄── {"state":{"items":[...],"itemCount":3},...}
//! ```
//!
//! Writes go to `<key>.json.tmp` first and are renamed into place, so a
//! crash mid-write leaves the previous record intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::storage::{validate_key, CartStorage};

/// Directory-backed storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))?;

        debug!(path = %path.display(), bytes = value.len(), "Wrote storage file");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.load("cart-storage").unwrap(), None);

        storage.save("cart-storage", "{\"a\":1}").unwrap();
        let path = storage.path_for("cart-storage").unwrap();
        assert!(path.ends_with("nested/cart-storage.json"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}");
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = FileStorage::new(dir.path().join("nested"));
        assert_eq!(
            reopened.load("cart-storage").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.save("cart-storage", "x").unwrap();
        storage.remove("cart-storage").unwrap();
        assert_eq!(storage.load("cart-storage").unwrap(), None);

        // Already gone
        storage.remove("cart-storage").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        let err = storage.save("../escape", "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey { .. }));
        assert!(storage.load("a/b").is_err());
    }

    #[test]
    fn test_unwritable_directory_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let mut storage = FileStorage::new(&blocker);
        let err = storage.save("cart-storage", "x").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
