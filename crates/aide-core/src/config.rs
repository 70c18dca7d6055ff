//! Console configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every field has a
//! default, so an empty or missing file yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Storage key the assistant collection is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "aide_assistants";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Key of the assistant collection in the durable store
    pub storage_key: String,
    /// Overrides the durable store directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Start from the sample assistants when nothing is stored yet
    pub seed_defaults: bool,
    pub delays: DelayConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: None,
            seed_defaults: true,
            delays: DelayConfig::default(),
        }
    }
}

/// Simulated latencies (milliseconds) around console confirmations.
///
/// These only shape the user experience; data is already consistent before
/// and after each wait.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DelayConfig {
    pub save_ms: u64,
    pub delete_ms: u64,
    pub training_ms: u64,
    pub chat_min_ms: u64,
    pub chat_max_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            save_ms: 500,
            delete_ms: 500,
            training_ms: 800,
            chat_min_ms: 1000,
            chat_max_ms: 2000,
        }
    }
}

impl DelayConfig {
    /// No waiting at all (tests, scripted CLI use).
    pub fn none() -> Self {
        Self {
            save_ms: 0,
            delete_ms: 0,
            training_ms: 0,
            chat_min_ms: 0,
            chat_max_ms: 0,
        }
    }

    pub fn save(&self) -> Duration {
        Duration::from_millis(self.save_ms)
    }

    pub fn delete(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }

    pub fn training(&self) -> Duration {
        Duration::from_millis(self.training_ms)
    }

    /// Chat reply delay bounds, normalised so that `min <= max`.
    pub fn chat_range(&self) -> (Duration, Duration) {
        let min = self.chat_min_ms.min(self.chat_max_ms);
        let max = self.chat_min_ms.max(self.chat_max_ms);
        (Duration::from_millis(min), Duration::from_millis(max))
    }
}
