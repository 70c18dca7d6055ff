//! Persistent store adapter over a durable key/value store.
//!
//! `LocalStorage` hands out one shared [`StoredValue`] per key. A value starts
//! out as its fallback with `loaded == false`; a single background task then
//! reads and decodes the stored copy and flips `loaded` to `true`, whether or
//! not a stored copy existed or decoded.
//!
//! Storage failures never reach callers. They are logged and the in-memory
//! value stays authoritative for the rest of the session.

use aide_core::error::{AideError, Result};
use aide_core::storage::KeyValueStore;
use serde::{Serialize, de::DeserializeOwned};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{RwLock, watch};

/// Converts a value to and from the string stored in the durable store.
pub trait ValueCodec<T>: Send + Sync {
    fn encode(&self, value: &T) -> Result<String>;
    fn decode(&self, raw: &str) -> Result<T>;
}

/// Plain serde JSON encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T> ValueCodec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode(&self, raw: &str) -> Result<T> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Entry point of the adapter: owns the durable store and the per-key values.
///
/// One instance should own a store for the whole process; the "one load per
/// key" guarantee holds per instance.
pub struct LocalStorage {
    store: Arc<dyn KeyValueStore>,
    entries: Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl LocalStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    /// Returns the value handle for `key`, starting its initial load on first use.
    ///
    /// The first call registers `fallback` and `codec` and spawns the one
    /// hydration attempt for this key on the current tokio runtime. Later calls
    /// return the same handle and ignore their arguments.
    ///
    /// # Errors
    ///
    /// - `Internal` if `key` was already loaded with a different value type
    /// - `Internal` if called outside a tokio runtime
    pub fn load<T, C>(&self, key: &str, fallback: T, codec: C) -> Result<Arc<StoredValue<T>>>
    where
        T: Clone + Send + Sync + 'static,
        C: ValueCodec<T> + 'static,
    {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(existing) = entries.get(key) {
            return Arc::clone(existing)
                .downcast::<StoredValue<T>>()
                .map_err(|_| {
                    AideError::internal(format!(
                        "Storage key '{}' is already loaded with a different type",
                        key
                    ))
                });
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            AideError::internal(format!("Cannot load '{}' outside a tokio runtime: {}", key, e))
        })?;

        let value = Arc::new(StoredValue::new(
            key.to_string(),
            fallback,
            Arc::clone(&self.store),
            Box::new(codec),
        ));
        entries.insert(key.to_string(), value.clone());
        drop(entries);

        let hydrating = Arc::clone(&value);
        runtime.spawn(async move {
            hydrating.hydrate().await;
        });

        Ok(value)
    }
}

struct StoredState<T> {
    value: T,
    /// Set once the value was written in this session; hydration must not
    /// overwrite it afterwards.
    written: bool,
}

/// A value mirrored to one key of the durable store.
pub struct StoredValue<T> {
    key: String,
    fallback: T,
    state: RwLock<StoredState<T>>,
    loaded: watch::Sender<bool>,
    store: Arc<dyn KeyValueStore>,
    codec: Box<dyn ValueCodec<T>>,
}

impl<T> StoredValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn new(
        key: String,
        fallback: T,
        store: Arc<dyn KeyValueStore>,
        codec: Box<dyn ValueCodec<T>>,
    ) -> Self {
        let (loaded, _) = watch::channel(false);
        Self {
            key,
            state: RwLock::new(StoredState {
                value: fallback.clone(),
                written: false,
            }),
            fallback,
            loaded,
            store,
            codec,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the initial load attempt has finished.
    pub fn is_loaded(&self) -> bool {
        *self.loaded.borrow()
    }

    /// Waits for the initial load attempt to finish.
    pub async fn wait_until_loaded(&self) {
        let mut receiver = self.loaded.subscribe();
        // The sender lives as long as `self`, so this only returns once loaded
        let _ = receiver.wait_for(|loaded| *loaded).await;
    }

    /// Current value and whether the initial load has finished.
    pub async fn snapshot(&self) -> (T, bool) {
        let state = self.state.read().await;
        (state.value.clone(), self.is_loaded())
    }

    pub async fn get(&self) -> T {
        self.state.read().await.value.clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R + Send,
    {
        let state = self.state.read().await;
        f(&state.value)
    }

    /// Replaces the value and persists it.
    pub async fn set(&self, value: T) {
        let mut state = self.state.write().await;
        state.value = value;
        state.written = true;
        self.persist(&state.value).await;
    }

    /// Mutates the value in place and persists the result.
    pub async fn update<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R + Send,
    {
        let mut state = self.state.write().await;
        let result = f(&mut state.value);
        state.written = true;
        self.persist(&state.value).await;
        result
    }

    /// Like [`update`](Self::update), but only persists when `f` returns `Some`.
    ///
    /// `f` must leave the value untouched when it returns `None`.
    pub async fn try_update<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> Option<R> + Send,
    {
        let mut state = self.state.write().await;
        let result = f(&mut state.value)?;
        state.written = true;
        self.persist(&state.value).await;
        Some(result)
    }

    /// Removes the stored copy and resets the value to the fallback.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        if let Err(e) = self.store.remove_item(&self.key).await {
            tracing::error!(key = %self.key, error = %e, "Failed to remove stored value");
        }
        state.value = self.fallback.clone();
        state.written = true;
    }

    /// The single initial load attempt.
    async fn hydrate(&self) {
        match self.read_stored().await {
            Ok(Some(stored)) => {
                let mut state = self.state.write().await;
                if state.written {
                    tracing::debug!(
                        key = %self.key,
                        "Value written before initial load finished; keeping in-memory value"
                    );
                } else {
                    state.value = stored;
                    tracing::debug!(key = %self.key, "Loaded stored value");
                }
            }
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored value; using fallback");
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Failed to load stored value; using fallback"
                );
            }
        }

        self.loaded.send_replace(true);
    }

    async fn read_stored(&self) -> Result<Option<T>> {
        match self.store.get_item(&self.key).await? {
            Some(raw) => self.codec.decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Encodes and writes the value; failures are logged and absorbed.
    async fn persist(&self, value: &T) {
        let result = match self.codec.encode(value) {
            Ok(raw) => self.store.set_item(&self.key, &raw).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::debug!(key = %self.key, "Persisted value");
            }
            Err(e) => {
                tracing::error!(
                    key = %self.key,
                    error = %e,
                    "Failed to persist value; continuing without persistence"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    fn memory_storage(store: MemoryKeyValueStore) -> (Arc<MemoryKeyValueStore>, LocalStorage) {
        let store = Arc::new(store);
        let storage = LocalStorage::new(store.clone());
        (store, storage)
    }

    #[tokio::test]
    async fn test_starts_with_fallback_then_loads() {
        let (_, storage) = memory_storage(MemoryKeyValueStore::with_item("numbers", "[1,2,3]"));

        let value = storage.load("numbers", Vec::<u32>::new(), JsonCodec).unwrap();
        assert!(!value.is_loaded());
        assert_eq!(value.get().await, Vec::<u32>::new());

        value.wait_until_loaded().await;
        assert_eq!(value.snapshot().await, (vec![1, 2, 3], true));
    }

    #[tokio::test]
    async fn test_missing_value_keeps_fallback() {
        let (_, storage) = memory_storage(MemoryKeyValueStore::new());

        let value = storage.load("numbers", vec![7u32], JsonCodec).unwrap();
        value.wait_until_loaded().await;

        assert_eq!(value.snapshot().await, (vec![7], true));
    }

    #[tokio::test]
    async fn test_corrupt_value_keeps_fallback() {
        let (_, storage) = memory_storage(MemoryKeyValueStore::with_item("numbers", "{oops"));

        let value = storage.load("numbers", vec![7u32], JsonCodec).unwrap();
        value.wait_until_loaded().await;

        assert_eq!(value.snapshot().await, (vec![7], true));
    }

    #[tokio::test]
    async fn test_unavailable_store_still_finishes_loading() {
        let store = MemoryKeyValueStore::with_item("numbers", "[1]");
        store.set_available(false);
        let (_, storage) = memory_storage(store);

        let value = storage.load("numbers", vec![7u32], JsonCodec).unwrap();
        value.wait_until_loaded().await;

        assert_eq!(value.snapshot().await, (vec![7], true));
    }

    #[tokio::test]
    async fn test_same_key_returns_same_handle() {
        let (_, storage) = memory_storage(MemoryKeyValueStore::with_item("numbers", "[1]"));

        let first = storage.load("numbers", Vec::<u32>::new(), JsonCodec).unwrap();
        let second = storage.load("numbers", vec![9u32], JsonCodec).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // Different type under the same key is rejected
        assert!(storage.load("numbers", String::new(), JsonCodec).is_err());
    }

    #[tokio::test]
    async fn test_set_persists_whole_value() {
        let (store, storage) = memory_storage(MemoryKeyValueStore::new());

        let value = storage.load("numbers", Vec::<u32>::new(), JsonCodec).unwrap();
        value.wait_until_loaded().await;
        value.set(vec![4, 5]).await;

        assert_eq!(store.peek("numbers").as_deref(), Some("[4,5]"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_write_before_load_finishes_wins() {
        let (store, storage) = memory_storage(MemoryKeyValueStore::with_item("numbers", "[1]"));

        let value = storage.load("numbers", Vec::<u32>::new(), JsonCodec).unwrap();
        assert!(!value.is_loaded());
        value.set(vec![9]).await;

        value.wait_until_loaded().await;
        assert_eq!(value.snapshot().await, (vec![9], true));
        assert_eq!(store.peek("numbers").as_deref(), Some("[9]"));
    }

    #[tokio::test]
    async fn test_try_update_none_does_not_persist() {
        let (store, storage) = memory_storage(MemoryKeyValueStore::new());

        let value = storage.load("numbers", vec![1u32], JsonCodec).unwrap();
        value.wait_until_loaded().await;

        let outcome: Option<()> = value.try_update(|_| None).await;
        assert!(outcome.is_none());
        assert!(store.peek("numbers").is_none());

        let outcome = value.try_update(|v| {
            v.push(2);
            Some(v.len())
        })
        .await;
        assert_eq!(outcome, Some(2));
        assert_eq!(store.peek("numbers").as_deref(), Some("[1,2]"));
    }

    #[tokio::test]
    async fn test_write_failure_keeps_in_memory_value() {
        let (store, storage) = memory_storage(MemoryKeyValueStore::with_quota(8));

        let value = storage.load("numbers", Vec::<u32>::new(), JsonCodec).unwrap();
        value.wait_until_loaded().await;
        value.set(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).await;

        assert_eq!(value.get().await.len(), 9);
        assert!(store.peek("numbers").is_none());
    }

    #[tokio::test]
    async fn test_clear_resets_to_fallback() {
        let (store, storage) = memory_storage(MemoryKeyValueStore::with_item("numbers", "[1,2]"));

        let value = storage.load("numbers", vec![0u32], JsonCodec).unwrap();
        value.wait_until_loaded().await;
        assert_eq!(value.get().await, vec![1, 2]);

        value.clear().await;

        assert_eq!(value.get().await, vec![0]);
        assert!(store.peek("numbers").is_none());
    }

    #[tokio::test]
    async fn test_fresh_session_reads_previous_save() {
        let store = Arc::new(MemoryKeyValueStore::new());

        {
            let storage = LocalStorage::new(store.clone());
            let value = storage.load("numbers", Vec::<u32>::new(), JsonCodec).unwrap();
            value.wait_until_loaded().await;
            value.set(vec![3, 1, 2]).await;
        }

        let storage = LocalStorage::new(store);
        let value = storage.load("numbers", Vec::<u32>::new(), JsonCodec).unwrap();
        value.wait_until_loaded().await;
        assert_eq!(value.get().await, vec![3, 1, 2]);
    }
}
