use aide_application::AssistantConsole;
use aide_core::config::{ConsoleConfig, DelayConfig};
use aide_infrastructure::{
    ConfigService, FileKeyValueStore, LocalStorage, LocalStorageAssistantRepository,
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a command needs: the resolved configuration and the console
/// over the file-backed store.
pub struct ConsoleContext {
    pub config: ConsoleConfig,
    pub console: AssistantConsole,
}

impl ConsoleContext {
    pub fn open(
        config_path: Option<PathBuf>,
        storage_dir: Option<PathBuf>,
        no_delay: bool,
    ) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new(),
        };

        let mut config = service
            .get_config()
            .context("Failed to load configuration")?;
        if no_delay {
            config.delays = DelayConfig::none();
        }

        let storage_dir = match storage_dir {
            Some(dir) => dir,
            None => service
                .storage_dir()
                .context("Failed to resolve storage directory")?,
        };
        tracing::debug!(storage_dir = %storage_dir.display(), key = %config.storage_key, "Opening assistant store");

        let storage = LocalStorage::new(Arc::new(FileKeyValueStore::new(storage_dir)));
        let repository = LocalStorageAssistantRepository::from_config(&storage, &config)
            .context("Failed to open assistant collection")?;
        let console = AssistantConsole::new(Arc::new(repository), config.delays.clone());

        Ok(Self { config, console })
    }
}
