//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema for persisting data.
//! They are private to the infrastructure layer and handle the evolution
//! of the storage format over time.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! We follow semantic versioning for schema changes:
//! - **MAJOR (X.0.0)**: Breaking changes (field removal, type changes)
//! - **MINOR (1.X.0)**: Backward-compatible additions and value remappings
//! - **PATCH (1.0.X)**: Backward-compatible fixes (not typically used for schema)
//!
//! ### Assistant Version History
//! - **1.0.0**: Unversioned browser payload (Spanish labels)
//! - **1.1.0**: English enum names

mod assistant;

// Re-export assistant DTOs and migrator
pub use assistant::{
    AssistantV1_0_0, AssistantV1_1_0, LEGACY_ASSISTANT_VERSION, LanguageDTO, LegacyLanguageDTO,
    LegacyToneDTO, ResponseLengthDTO, ToneDTO, create_assistant_migrator,
};
