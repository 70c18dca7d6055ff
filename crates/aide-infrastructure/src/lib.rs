pub mod config_service;
pub mod dto;
pub mod local_storage;
pub mod local_storage_assistant_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::local_storage::{JsonCodec, LocalStorage, StoredValue, ValueCodec};
pub use crate::local_storage_assistant_repository::{
    AssistantCollectionCodec, LocalStorageAssistantRepository,
};
pub use crate::paths::AidePaths;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
