//! In-memory key/value store.
//!
//! Backs tests and sessions that run without a writable directory. It can
//! enforce a byte quota and be switched offline, mirroring how browser
//! storage fails (quota exceeded, storage disabled).

use aide_core::error::{AideError, Result};
use aide_core::storage::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    items: Mutex<HashMap<String, String>>,
    /// Maximum total size of keys and values, in bytes
    quota: Option<usize>,
    unavailable: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once keys + values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.lock_items().insert(key.to_string(), value.to_string());
        store
    }

    /// Makes every subsequent operation fail (or succeed again).
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Reads an entry directly, bypassing availability checks.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock_items().get(key).cloned()
    }

    fn lock_items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still structurally valid
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AideError::unavailable("in-memory store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.ensure_available()?;
        Ok(self.lock_items().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_available()?;
        let mut items = self.lock_items();

        if let Some(limit) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(AideError::QuotaExceeded { needed, limit });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.ensure_available()?;
        self.lock_items().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let store = MemoryKeyValueStore::new();
        store.set_item("k", "v").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("v"));
        store.remove_item("k").await.unwrap();
        assert!(store.get_item("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_quota_exceeded_keeps_previous_value() {
        let store = MemoryKeyValueStore::with_quota(10);
        store.set_item("k", "small").await.unwrap();

        let err = store.set_item("k", "much too large").await.unwrap_err();
        assert!(matches!(err, AideError::QuotaExceeded { .. }));
        assert_eq!(store.peek("k").as_deref(), Some("small"));
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_operation() {
        let store = MemoryKeyValueStore::with_item("k", "v");
        store.set_available(false);

        assert!(store.get_item("k").await.is_err());
        assert!(store.set_item("k", "w").await.is_err());
        assert!(store.remove_item("k").await.is_err());

        store.set_available(true);
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("v"));
    }
}
