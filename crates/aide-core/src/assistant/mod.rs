//! Assistant domain module.
//!
//! This module contains all assistant-related domain models, the repository
//! interface, and the sample presets.
//!
//! # Module Structure
//!
//! - `model`: Core assistant domain models (`Assistant`, `Language`, `Tone`, `ResponseLength`)
//! - `request`: Creation request, partial-update patch and id generation
//! - `repository`: Repository trait for the assistant collection
//! - `preset`: Sample assistants used as the initial collection
//!
//! # Usage
//!
//! ```ignore
//! use aide_core::assistant::{Assistant, AssistantRepository, CreateAssistantRequest};
//! ```

mod model;
mod preset;
mod repository;
pub mod request;

// Re-export public API
pub use model::{Assistant, Language, ResponseLength, Tone};
pub use preset::default_assistants;
pub use repository::AssistantRepository;
pub use request::{AssistantPatch, CreateAssistantRequest, generate_assistant_id};

/// Entity name used for storage and migration.
pub const ASSISTANT_ENTITY: &str = "assistant";
