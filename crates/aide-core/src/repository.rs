//! Repository trait re-exports.
//!
//! This module provides centralized access to the storage-facing traits.

// Re-export AssistantRepository from assistant module
pub use crate::assistant::AssistantRepository;

// Re-export KeyValueStore from storage module
pub use crate::storage::KeyValueStore;
