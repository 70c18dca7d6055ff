//! Assistant domain model.
//!
//! An assistant is a configuration profile for one simulated conversational
//! agent: its display name, language, tone, response-length mix, audio flag
//! and free-text training rules.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Languages an assistant can answer in.
///
/// Parsing accepts the English name as well as the label used by the
/// original Spanish-language console, ignoring ASCII case.
#[derive(
    Deserialize,
    Serialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[strum(to_string = "Spanish", serialize = "Español")]
    Spanish,
    #[strum(to_string = "English", serialize = "Inglés")]
    English,
    #[strum(to_string = "Portuguese", serialize = "Portugués")]
    Portuguese,
}

impl Language {
    /// All supported languages, in display order.
    pub fn options() -> Vec<Language> {
        Language::iter().collect()
    }
}

/// Conversational tone of an assistant.
#[derive(
    Deserialize,
    Serialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Tone {
    #[strum(to_string = "Formal")]
    Formal,
    #[strum(to_string = "Casual")]
    Casual,
    #[strum(to_string = "Professional", serialize = "Profesional")]
    Professional,
    #[strum(to_string = "Friendly", serialize = "Amigable")]
    Friendly,
}

impl Tone {
    /// All supported tones, in display order.
    pub fn options() -> Vec<Tone> {
        Tone::iter().collect()
    }
}

/// Percentage mix of short, medium and long replies.
///
/// Values are signed so that out-of-range form input can be represented and
/// rejected by validation instead of being silently clamped.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseLength {
    pub short: i32,
    pub medium: i32,
    pub long: i32,
}

impl ResponseLength {
    pub fn new(short: i32, medium: i32, long: i32) -> Self {
        Self {
            short,
            medium,
            long,
        }
    }

    /// Sum of the three percentages, widened so any form input fits.
    pub fn total(&self) -> i64 {
        i64::from(self.short) + i64::from(self.medium) + i64::from(self.long)
    }
}

impl Default for ResponseLength {
    /// The mix a fresh creation form starts from.
    fn default() -> Self {
        Self::new(33, 34, 33)
    }
}

/// A persisted assistant configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Assistant {
    /// Unique identifier, assigned at creation and never changed
    pub id: String,
    /// Display name
    pub name: String,
    pub language: Language,
    pub tone: Tone,
    pub response_length: ResponseLength,
    /// Whether replies are also rendered as audio
    #[serde(default)]
    pub audio_enabled: bool,
    /// Free-text training instructions, empty until the first training save
    #[serde(default)]
    pub rules: String,
}

impl Assistant {
    /// Returns true once training rules have been written for this assistant.
    pub fn is_trained(&self) -> bool {
        !self.rules.trim().is_empty()
    }
}
