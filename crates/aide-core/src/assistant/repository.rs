//! Assistant repository trait.
//!
//! Defines the CRUD surface the console uses over the assistant collection.

use super::model::Assistant;
use super::request::{AssistantPatch, CreateAssistantRequest};

/// An abstract repository over the ordered assistant collection.
///
/// This trait decouples the console flows from the storage mechanism
/// (local key/value store, in-memory, ...).
///
/// # Implementation Notes
///
/// - Insertion order is preserved and is the display order.
/// - Input is trusted: callers run the validation rules before `create`
///   and `update`.
/// - An unknown id on `update`/`delete` is a normal outcome reported as
///   `false`, never an error.
/// - Storage failures are absorbed by the implementation; the in-memory
///   collection stays authoritative for the rest of the session.
#[async_trait::async_trait]
pub trait AssistantRepository: Send + Sync {
    /// Whether the initial load from durable storage has completed.
    fn is_loaded(&self) -> bool;

    /// Waits until the initial load from durable storage has completed.
    async fn wait_until_loaded(&self);

    /// Returns all assistants in insertion order.
    async fn list(&self) -> Vec<Assistant>;

    /// Finds an assistant by id.
    async fn get(&self, id: &str) -> Option<Assistant>;

    /// Creates an assistant with a fresh id and empty rules, appends it and
    /// persists the collection.
    async fn create(&self, request: CreateAssistantRequest) -> Assistant;

    /// Merges `patch` into the assistant with the given id.
    ///
    /// # Returns
    ///
    /// - `true`: The assistant was updated and the collection persisted
    /// - `false`: No assistant has this id; nothing changed
    async fn update(&self, id: &str, patch: AssistantPatch) -> bool;

    /// Removes the assistant with the given id.
    ///
    /// # Returns
    ///
    /// - `true`: The assistant was removed and the collection persisted
    /// - `false`: No assistant has this id; nothing changed
    async fn delete(&self, id: &str) -> bool;

    /// Replaces the training rules of an assistant.
    async fn update_training(&self, id: &str, rules: &str) -> bool {
        self.update(id, AssistantPatch::rules(rules)).await
    }

    /// Drops the stored collection and resets to the fallback collection.
    async fn clear(&self);
}
