//! Unified path management for aide files.
//!
//! ```text
//! ~/.config/aide/              # Config directory
//! └── config.toml              # Console configuration
//!
//! ~/.local/share/aide/         # Data directory
//! └── storage/                 # Durable key/value store
//!     └── aide_assistants.json
//! ```

use aide_core::error::{AideError, Result};
use std::path::PathBuf;

const APP_NAME: &str = "aide";

/// Resolves platform-specific locations (XDG on Linux, the platform
/// conventions elsewhere).
pub struct AidePaths;

impl AidePaths {
    /// Returns the aide configuration directory (e.g. `~/.config/aide/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or_else(|| AideError::config("Cannot find config directory"))
    }

    /// Returns the aide data directory (e.g. `~/.local/share/aide/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or_else(|| AideError::config("Cannot find data directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default directory of the file-backed key/value store.
    pub fn storage_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("storage"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        if let Ok(path) = AidePaths::config_file() {
            assert!(path.ends_with("aide/config.toml"));
        }
    }

    #[test]
    fn test_storage_dir() {
        if let Ok(path) = AidePaths::storage_dir() {
            assert!(path.ends_with("aide/storage"));
            assert!(path.starts_with(AidePaths::data_dir().unwrap()));
        }
    }
}
