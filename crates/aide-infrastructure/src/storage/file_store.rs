//! File-backed key/value store with atomic writes.
//!
//! Each key is stored as `<base_dir>/<key>.json`. Writes go through a
//! temporary file, fsync and atomic rename under an exclusive lock file, so a
//! reader sees either the previous value or the new one, never a partial
//! write.

use aide_core::error::{AideError, Result};
use aide_core::storage::KeyValueStore;
use async_trait::async_trait;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::task;

use super::atomic_write::write_atomic;

/// A durable key/value store rooted at a directory.
///
/// Responsibilities:
/// - **Key → file mapping** (`<key>.json`)
/// - **File locking** (exclusive write lock)
/// - **Atomic writes** (tmp file + fsync + atomic rename)
///
/// Does NOT:
/// - Know about JSON contents (values are opaque strings)
/// - Handle migrations (delegated to the value codec)
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a new store handle. The directory is created on first write.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves the file path for a key.
    ///
    /// Keys are restricted to ASCII alphanumerics, `_`, `-` and `.` so they
    /// cannot escape the base directory.
    fn item_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(AideError::data_access(format!(
                "Invalid storage key '{}'",
                key
            )));
        }

        Ok(self.base_dir.join(format!("{}.json", key)))
    }

    fn read_sync(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AideError::io(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn write_sync(path: &Path, value: &str) -> Result<()> {
        write_atomic(path, value.as_bytes())
    }

    fn remove_sync(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AideError::io(format!(
                "Failed to delete '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;

        task::spawn_blocking(move || Self::read_sync(&path))
            .await
            .map_err(|e| AideError::io(format!("Failed to spawn blocking task: {}", e)))?
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        let value = value.to_string();

        task::spawn_blocking(move || Self::write_sync(&path, &value))
            .await
            .map_err(|e| AideError::io(format!("Failed to spawn blocking task: {}", e)))?
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;

        task::spawn_blocking(move || Self::remove_sync(&path))
            .await
            .map_err(|e| AideError::io(format!("Failed to spawn blocking task: {}", e)))?
    }
}
