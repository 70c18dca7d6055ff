//! Error types for the Aide console.

use thiserror::Error;

/// Failures of the storage, configuration and migration layers.
///
/// Form validation never produces an `AideError`; it yields a
/// [`crate::validation::ValidationErrors`] map. Repository update/delete on
/// an unknown id report `false`. `NotFound` is for surfaces that have to
/// turn that outcome into an error, such as the CLI.
#[derive(Error, Debug, Clone)]
pub enum AideError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// Filesystem failure while reading or writing the store
    #[error("IO error: {message}")]
    Io { message: String },

    /// Invalid request to the store, e.g. a malformed key
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Stored or configured data could not be encoded or decoded
    #[error("{format} error: {message}")]
    Serialization { format: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// A versioned record could not be migrated to the current schema
    #[error("Migration error: {0}")]
    Migration(String),

    /// The durable store cannot be reached
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The durable store refused a write because it is full
    #[error("Storage quota exceeded: {needed} bytes needed, {limit} bytes allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AideError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// `format` names the encoding involved ("JSON", "TOML", ...).
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<std::io::Error> for AideError {
    fn from(err: std::io::Error) -> Self {
        Self::io(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for AideError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON", err.to_string())
    }
}

impl From<toml::de::Error> for AideError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization("TOML", err.to_string())
    }
}

impl From<toml::ser::Error> for AideError {
    fn from(err: toml::ser::Error) -> Self {
        Self::serialization("TOML", err.to_string())
    }
}

impl From<version_migrate::MigrationError> for AideError {
    fn from(err: version_migrate::MigrationError) -> Self {
        use version_migrate::MigrationError;

        match err {
            // Record shape problems are decode failures like any other bad payload
            MigrationError::DeserializationError(_) | MigrationError::SerializationError(_) => {
                Self::serialization("Versioned JSON", err.to_string())
            }
            _ => Self::Migration(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AideError>;
