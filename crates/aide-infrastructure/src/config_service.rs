//! Configuration service implementation.
//!
//! Loads the console configuration from `~/.config/aide/config.toml` (or an
//! explicit path) and caches it.

use crate::paths::AidePaths;
use crate::storage::AtomicTomlFile;
use aide_core::config::ConsoleConfig;
use aide_core::error::Result;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the console configuration.
///
/// A missing or empty file yields the defaults. A malformed file is an error
/// so that a typo is not silently replaced by defaults.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<ConsoleConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading `path` instead of the default location.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Path of the config file this service reads.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => AidePaths::config_file(),
        }
    }

    /// Gets the configuration, loading it from file if not cached.
    pub fn get_config(&self) -> Result<ConsoleConfig> {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.load_config()?;

        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Writes `config` to the file and replaces the cached copy.
    pub fn save_config(&self, config: &ConsoleConfig) -> Result<()> {
        let file = AtomicTomlFile::new(self.config_path()?);
        file.save(config)?;

        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = Some(config.clone());
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = None;
    }

    /// Resolves the durable store directory: configured override or default.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        match self.get_config()?.storage_dir {
            Some(dir) => Ok(dir),
            None => AidePaths::storage_dir(),
        }
    }

    fn load_config(&self) -> Result<ConsoleConfig> {
        let path = self.config_path()?;
        let file = AtomicTomlFile::<ConsoleConfig>::new(path.clone());

        match file.load()? {
            Some(config) => {
                tracing::debug!(path = %path.display(), "Loaded console configuration");
                Ok(config)
            }
            None => {
                tracing::debug!(path = %path.display(), "No configuration file; using defaults");
                Ok(ConsoleConfig::default())
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
