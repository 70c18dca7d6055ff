//! AssistantRepository backed by the persistent store adapter.

use crate::dto::{AssistantV1_1_0, LEGACY_ASSISTANT_VERSION, create_assistant_migrator};
use crate::local_storage::{LocalStorage, StoredValue, ValueCodec};
use aide_core::assistant::{
    ASSISTANT_ENTITY, Assistant, AssistantPatch, AssistantRepository, CreateAssistantRequest,
    default_assistants, generate_assistant_id,
};
use aide_core::config::ConsoleConfig;
use aide_core::error::{AideError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Encodes the assistant collection as a JSON array of versioned records.
///
/// Decoding accepts every known schema version and migrates to the domain
/// model. Records without a `version` key are treated as the legacy schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssistantCollectionCodec;

impl ValueCodec<Vec<Assistant>> for AssistantCollectionCodec {
    fn encode(&self, assistants: &Vec<Assistant>) -> Result<String> {
        let dtos: Vec<AssistantV1_1_0> = assistants.iter().map(AssistantV1_1_0::from).collect();

        let migrator = create_assistant_migrator();
        Ok(migrator.save_vec_flat(dtos)?)
    }

    fn decode(&self, raw: &str) -> Result<Vec<Assistant>> {
        let Value::Array(records) = serde_json::from_str::<Value>(raw)? else {
            return Err(AideError::serialization(
                "JSON",
                "expected an array of assistant records",
            ));
        };

        let records: Vec<Value> = records.into_iter().map(stamp_legacy_version).collect();

        let migrator = create_assistant_migrator();
        Ok(migrator.load_vec_flat_from(ASSISTANT_ENTITY, records)?)
    }
}

fn stamp_legacy_version(mut record: Value) -> Value {
    if let Value::Object(fields) = &mut record {
        fields
            .entry("version")
            .or_insert_with(|| Value::String(LEGACY_ASSISTANT_VERSION.to_string()));
    }
    record
}

/// Assistant collection stored under one key of a [`LocalStorage`].
///
/// Responsibilities:
/// - Keep the ordered collection (insertion order, creates append)
/// - Persist every successful mutation as a whole
/// - Wait for the initial load before mutating, so stored data is never
///   replaced by a mutation made against the fallback
///
/// Does NOT:
/// - Validate assistants (callers validate before creating or updating)
/// - Report storage failures (the adapter logs and absorbs them)
#[derive(Clone)]
pub struct LocalStorageAssistantRepository {
    assistants: Arc<StoredValue<Vec<Assistant>>>,
}

impl LocalStorageAssistantRepository {
    /// Opens the collection stored under `key`, falling back to `fallback`.
    pub fn new(storage: &LocalStorage, key: &str, fallback: Vec<Assistant>) -> Result<Self> {
        let assistants = storage.load(key, fallback, AssistantCollectionCodec)?;
        Ok(Self { assistants })
    }

    /// Opens the collection named by the console configuration.
    ///
    /// The fallback is the preset collection unless `seed_defaults` is off.
    pub fn from_config(storage: &LocalStorage, config: &ConsoleConfig) -> Result<Self> {
        let fallback = if config.seed_defaults {
            default_assistants()
        } else {
            Vec::new()
        };
        Self::new(storage, &config.storage_key, fallback)
    }

    pub fn storage_key(&self) -> &str {
        self.assistants.key()
    }
}

#[async_trait]
impl AssistantRepository for LocalStorageAssistantRepository {
    fn is_loaded(&self) -> bool {
        self.assistants.is_loaded()
    }

    async fn wait_until_loaded(&self) {
        self.assistants.wait_until_loaded().await;
    }

    async fn list(&self) -> Vec<Assistant> {
        self.assistants.get().await
    }

    async fn get(&self, id: &str) -> Option<Assistant> {
        self.assistants
            .read(|assistants| assistants.iter().find(|a| a.id == id).cloned())
            .await
    }

    async fn create(&self, request: CreateAssistantRequest) -> Assistant {
        self.assistants.wait_until_loaded().await;

        let created = self
            .assistants
            .update(move |assistants| {
                let mut id = generate_assistant_id();
                while assistants.iter().any(|a| a.id == id) {
                    id = generate_assistant_id();
                }

                let assistant = request.into_assistant(id);
                assistants.push(assistant.clone());
                assistant
            })
            .await;

        tracing::debug!(id = %created.id, name = %created.name, "Created assistant");
        created
    }

    async fn update(&self, id: &str, patch: AssistantPatch) -> bool {
        self.assistants.wait_until_loaded().await;

        let updated = self
            .assistants
            .try_update(move |assistants| {
                let assistant = assistants.iter_mut().find(|a| a.id == id)?;
                patch.apply_to(assistant);
                Some(())
            })
            .await
            .is_some();

        if updated {
            tracing::debug!(id = %id, "Updated assistant");
        } else {
            tracing::debug!(id = %id, "Update ignored; assistant not found");
        }
        updated
    }

    async fn delete(&self, id: &str) -> bool {
        self.assistants.wait_until_loaded().await;

        let deleted = self
            .assistants
            .try_update(|assistants| {
                let index = assistants.iter().position(|a| a.id == id)?;
                assistants.remove(index);
                Some(())
            })
            .await
            .is_some();

        if deleted {
            tracing::debug!(id = %id, "Deleted assistant");
        } else {
            tracing::debug!(id = %id, "Delete ignored; assistant not found");
        }
        deleted
    }

    async fn clear(&self) {
        self.assistants.wait_until_loaded().await;
        self.assistants.clear().await;
    }
}
