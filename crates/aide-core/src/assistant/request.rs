//! Assistant creation and update request models.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Assistant, Language, ResponseLength, Tone};

/// Number of random base-36 characters appended to the timestamp in an id.
const ID_RANDOM_SUFFIX_LEN: usize = 11;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Request to create a new assistant.
///
/// This is the form data collected by the two-step creation wizard once both
/// steps have passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssistantRequest {
    pub name: String,
    pub language: Language,
    pub tone: Tone,
    pub response_length: ResponseLength,
    #[serde(default)]
    pub audio_enabled: bool,
}

impl CreateAssistantRequest {
    /// Convert this request into an Assistant with the given id and no rules.
    pub fn into_assistant(self, id: String) -> Assistant {
        Assistant {
            id,
            name: self.name,
            language: self.language,
            tone: self.tone,
            response_length: self.response_length,
            audio_enabled: self.audio_enabled,
            rules: String::new(),
        }
    }

    /// Create a request from an existing Assistant (for editing).
    pub fn from_assistant(assistant: &Assistant) -> Self {
        Self {
            name: assistant.name.clone(),
            language: assistant.language,
            tone: assistant.tone,
            response_length: assistant.response_length,
            audio_enabled: assistant.audio_enabled,
        }
    }
}

/// Partial update of an assistant.
///
/// Every present field replaces the stored value; absent fields are kept.
/// The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_length: Option<ResponseLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
}

impl AssistantPatch {
    /// A patch that only replaces the training rules.
    pub fn rules(rules: impl Into<String>) -> Self {
        Self {
            rules: Some(rules.into()),
            ..Self::default()
        }
    }

    /// A patch replacing every field the edit form covers.
    pub fn from_request(request: CreateAssistantRequest) -> Self {
        Self {
            name: Some(request.name),
            language: Some(request.language),
            tone: Some(request.tone),
            response_length: Some(request.response_length),
            audio_enabled: Some(request.audio_enabled),
            rules: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the patch to an assistant in place.
    pub fn apply_to(self, assistant: &mut Assistant) {
        if let Some(name) = self.name {
            assistant.name = name;
        }
        if let Some(language) = self.language {
            assistant.language = language;
        }
        if let Some(tone) = self.tone {
            assistant.tone = tone;
        }
        if let Some(response_length) = self.response_length {
            assistant.response_length = response_length;
        }
        if let Some(audio_enabled) = self.audio_enabled {
            assistant.audio_enabled = audio_enabled;
        }
        if let Some(rules) = self.rules {
            assistant.rules = rules;
        }
    }
}

/// Generates a new assistant id.
///
/// The id is the base-36 millisecond timestamp followed by a random base-36
/// fragment. Uniqueness is best effort, which is enough for a local,
/// single-user collection.
pub fn generate_assistant_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_RANDOM_SUFFIX_LEN)
        .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
        .collect();

    format!("{}{}", to_base36(millis), suffix)
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // Only ASCII digits were pushed
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CreateAssistantRequest {
        CreateAssistantRequest {
            name: "Sales Bot".to_string(),
            language: Language::English,
            tone: Tone::Formal,
            response_length: ResponseLength::new(30, 40, 30),
            audio_enabled: false,
        }
    }

    #[test]
    fn test_into_assistant_starts_untrained() {
        let assistant = sample_request().into_assistant("id-1".to_string());
        assert_eq!(assistant.id, "id-1");
        assert_eq!(assistant.rules, "");
        assert_eq!(assistant.name, "Sales Bot");
    }

    #[test]
    fn test_from_assistant_round_trips_form_fields() {
        let assistant = sample_request().into_assistant("id-1".to_string());
        assert_eq!(CreateAssistantRequest::from_assistant(&assistant), sample_request());
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut assistant = sample_request().into_assistant("id-1".to_string());
        let before = assistant.clone();

        AssistantPatch {
            name: Some("X".to_string()),
            ..AssistantPatch::default()
        }
        .apply_to(&mut assistant);

        assert_eq!(assistant.name, "X");
        assert_eq!(
            Assistant {
                name: before.name.clone(),
                ..assistant.clone()
            },
            before
        );
    }

    #[test]
    fn test_rules_patch() {
        let mut assistant = sample_request().into_assistant("id-1".to_string());
        AssistantPatch::rules("Be concise.").apply_to(&mut assistant);
        assert_eq!(assistant.rules, "Be concise.");
        assert!(!AssistantPatch::rules("").is_empty());
        assert!(AssistantPatch::default().is_empty());
    }

    #[test]
    fn test_generated_ids_are_base36_and_distinct() {
        let a = generate_assistant_id();
        let b = generate_assistant_id();
        assert_ne!(a, b);
        assert!(a.len() > ID_RANDOM_SUFFIX_LEN);
        assert!(a.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
