//! Assistant DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Shape written by the original browser console: camelCase keys,
//!   language and tone stored as the Spanish UI labels. Payloads from that
//!   console carry no `version` key at all.
//! - **1.1.0**: Language and tone stored as English enum names.

use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, MigratesTo, Versioned};

use aide_core::assistant::{ASSISTANT_ENTITY, Assistant, Language, ResponseLength, Tone};

/// Version stamped on stored records that predate schema versioning.
pub const LEGACY_ASSISTANT_VERSION: &str = "1.0.0";

// ============================================================================
// Shared DTOs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseLengthDTO {
    pub short: i32,
    pub medium: i32,
    pub long: i32,
}

impl From<ResponseLengthDTO> for ResponseLength {
    fn from(dto: ResponseLengthDTO) -> Self {
        ResponseLength::new(dto.short, dto.medium, dto.long)
    }
}

impl From<ResponseLength> for ResponseLengthDTO {
    fn from(mix: ResponseLength) -> Self {
        ResponseLengthDTO {
            short: mix.short,
            medium: mix.medium,
            long: mix.long,
        }
    }
}

// ============================================================================
// V1.0.0 (legacy labels)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegacyLanguageDTO {
    #[serde(rename = "Español")]
    Spanish,
    #[serde(rename = "Inglés")]
    English,
    #[serde(rename = "Portugués")]
    Portuguese,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegacyToneDTO {
    Formal,
    Casual,
    #[serde(rename = "Profesional")]
    Professional,
    #[serde(rename = "Amigable")]
    Friendly,
}

/// Assistant DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct AssistantV1_0_0 {
    pub id: String,
    pub name: String,
    pub language: LegacyLanguageDTO,
    pub tone: LegacyToneDTO,
    pub response_length: ResponseLengthDTO,
    #[serde(default)]
    pub audio_enabled: bool,
    #[serde(default)]
    pub rules: String,
}

// ============================================================================
// V1.1.0 (current)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageDTO {
    Spanish,
    English,
    Portuguese,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneDTO {
    Formal,
    Casual,
    Professional,
    Friendly,
}

/// Assistant DTO V1.1.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct AssistantV1_1_0 {
    pub id: String,
    pub name: String,
    pub language: LanguageDTO,
    pub tone: ToneDTO,
    pub response_length: ResponseLengthDTO,
    #[serde(default)]
    pub audio_enabled: bool,
    #[serde(default)]
    pub rules: String,
}

// ============================================================================
// Migration implementations
// ============================================================================

impl From<LegacyLanguageDTO> for LanguageDTO {
    fn from(legacy: LegacyLanguageDTO) -> Self {
        match legacy {
            LegacyLanguageDTO::Spanish => LanguageDTO::Spanish,
            LegacyLanguageDTO::English => LanguageDTO::English,
            LegacyLanguageDTO::Portuguese => LanguageDTO::Portuguese,
        }
    }
}

impl From<LegacyToneDTO> for ToneDTO {
    fn from(legacy: LegacyToneDTO) -> Self {
        match legacy {
            LegacyToneDTO::Formal => ToneDTO::Formal,
            LegacyToneDTO::Casual => ToneDTO::Casual,
            LegacyToneDTO::Professional => ToneDTO::Professional,
            LegacyToneDTO::Friendly => ToneDTO::Friendly,
        }
    }
}

/// Migration from AssistantV1_0_0 to AssistantV1_1_0.
impl MigratesTo<AssistantV1_1_0> for AssistantV1_0_0 {
    fn migrate(self) -> AssistantV1_1_0 {
        AssistantV1_1_0 {
            id: self.id,
            name: self.name,
            language: self.language.into(),
            tone: self.tone.into(),
            response_length: self.response_length,
            audio_enabled: self.audio_enabled,
            rules: self.rules,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<LanguageDTO> for Language {
    fn from(dto: LanguageDTO) -> Self {
        match dto {
            LanguageDTO::Spanish => Language::Spanish,
            LanguageDTO::English => Language::English,
            LanguageDTO::Portuguese => Language::Portuguese,
        }
    }
}

impl From<Language> for LanguageDTO {
    fn from(language: Language) -> Self {
        match language {
            Language::Spanish => LanguageDTO::Spanish,
            Language::English => LanguageDTO::English,
            Language::Portuguese => LanguageDTO::Portuguese,
        }
    }
}

impl From<ToneDTO> for Tone {
    fn from(dto: ToneDTO) -> Self {
        match dto {
            ToneDTO::Formal => Tone::Formal,
            ToneDTO::Casual => Tone::Casual,
            ToneDTO::Professional => Tone::Professional,
            ToneDTO::Friendly => Tone::Friendly,
        }
    }
}

impl From<Tone> for ToneDTO {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Formal => ToneDTO::Formal,
            Tone::Casual => ToneDTO::Casual,
            Tone::Professional => ToneDTO::Professional,
            Tone::Friendly => ToneDTO::Friendly,
        }
    }
}

/// Convert AssistantV1_1_0 DTO to domain model.
impl IntoDomain<Assistant> for AssistantV1_1_0 {
    fn into_domain(self) -> Assistant {
        Assistant {
            id: self.id,
            name: self.name,
            language: self.language.into(),
            tone: self.tone.into(),
            response_length: self.response_length.into(),
            audio_enabled: self.audio_enabled,
            rules: self.rules,
        }
    }
}

/// Convert domain model to AssistantV1_1_0 DTO for persistence.
impl From<&Assistant> for AssistantV1_1_0 {
    fn from(assistant: &Assistant) -> Self {
        AssistantV1_1_0 {
            id: assistant.id.clone(),
            name: assistant.name.clone(),
            language: assistant.language.into(),
            tone: assistant.tone.into(),
            response_length: assistant.response_length.into(),
            audio_enabled: assistant.audio_enabled,
            rules: assistant.rules.clone(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for Assistant entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Maps the Spanish UI labels to English enum names
/// - V1.1.0 → Assistant: Converts DTO to domain model
///
/// # Example
///
/// ```ignore
/// let migrator = create_assistant_migrator();
/// let assistants: Vec<Assistant> = migrator.load_vec_flat_from("assistant", values)?;
/// ```
pub fn create_assistant_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    // Register migration path: V1.0.0 -> V1.1.0 -> Assistant
    let assistant_path = version_migrate::Migrator::define(ASSISTANT_ENTITY)
        .from::<AssistantV1_0_0>()
        .step::<AssistantV1_1_0>()
        .into::<Assistant>();

    migrator
        .register(assistant_path)
        .expect("Failed to register assistant migration path");

    migrator
}
