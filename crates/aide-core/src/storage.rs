//! Durable key/value store interface.
//!
//! The console persists everything through a small string key/value store,
//! modelled on browser local storage. Implementations live in the
//! infrastructure layer.

use crate::error::Result;

/// An abstract durable key/value store.
///
/// # Implementation Notes
///
/// - `set_item` replaces the previous value as a whole; readers never see a
///   partial write.
/// - A missing key is `Ok(None)`, not an error.
/// - Unreachable or full stores report `AideError::StorageUnavailable` /
///   `AideError::QuotaExceeded`.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw value stored under `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any prior value.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key succeeds.
    async fn remove_item(&self, key: &str) -> Result<()>;
}
