//! Atomic file replacement shared by the file-backed stores.
//!
//! Writers serialize on a `<stem>.lock` sibling held with an `fs2` exclusive
//! lock, write a hidden temp file, fsync it and rename it over the target.
//! The lock file is never removed, so every writer locks the same inode.

use aide_core::error::{AideError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Replaces the contents of `path` with `contents` atomically.
///
/// Creates the parent directory when missing.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                AideError::unavailable(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let _lock = FileLock::acquire(path)?;

    // Write to temporary file in the same directory
    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        AideError::io(format!(
            "Failed to create temp file '{}': {}",
            tmp_path.display(),
            e
        ))
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        AideError::io(format!(
            "Failed to write to temp file '{}': {}",
            tmp_path.display(),
            e
        ))
    })?;

    // Ensure data is written to disk
    tmp_file.sync_all().map_err(|e| {
        AideError::io(format!(
            "Failed to sync temp file '{}': {}",
            tmp_path.display(),
            e
        ))
    })?;
    drop(tmp_file);

    // Atomic rename
    fs::rename(&tmp_path, path).map_err(|e| {
        AideError::io(format!(
            "Failed to rename temp file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Gets the temporary file path used for atomic writes to `path`.
pub(crate) fn temp_path(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| AideError::io(format!("Path '{}' has no parent", path.display())))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| AideError::io(format!("Path '{}' has no file name", path.display())))?;

    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

/// Exclusive lock on a `<stem>.lock` sibling, released on drop.
pub(crate) struct FileLock {
    #[cfg_attr(not(unix), allow(dead_code))]
    file: File,
}

impl FileLock {
    /// Acquires an exclusive lock next to the given path (`<stem>.lock`).
    pub(crate) fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AideError::unavailable(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            use fs2::FileExt;
            let _ = self.file.unlock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parent_and_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("value.json");

        write_atomic(&path, b"[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(!temp_path(&path).unwrap().exists());
    }

    #[test]
    fn test_lock_file_survives_release_and_can_be_reacquired() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("value.json");

        let first = FileLock::acquire(&path).unwrap();
        drop(first);
        assert!(path.with_extension("lock").exists());

        let _second = FileLock::acquire(&path).unwrap();

        #[cfg(unix)]
        {
            use fs2::FileExt;
            let other = OpenOptions::new()
                .write(true)
                .open(path.with_extension("lock"))
                .unwrap();
            assert!(other.try_lock_exclusive().is_err());
        }
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let tmp = temp_path(Path::new("/data/aide/config.toml")).unwrap();
        assert_eq!(tmp, PathBuf::from("/data/aide/.config.toml.tmp"));
    }
}
