//! Form validation rules.
//!
//! Pure functions over raw form input. They never touch the repository and
//! never log: a failed check is reported as an entry in a field-keyed
//! [`ValidationErrors`] map, and a field without an entry is valid.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assistant::{CreateAssistantRequest, Language, ResponseLength, Tone};

pub const FIELD_NAME: &str = "name";
pub const FIELD_LANGUAGE: &str = "language";
pub const FIELD_TONE: &str = "tone";
pub const FIELD_RESPONSE_LENGTH: &str = "responseLength";
pub const FIELD_RULES: &str = "rules";

pub const MIN_NAME_CHARS: usize = 3;
pub const MIN_RULES_CHARS: usize = 20;
pub const MAX_RULES_CHARS: usize = 5000;

/// Field-keyed validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for a field, replacing any earlier one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Moves every entry of `other` into `self`.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Step one of the assistant form: identity fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    /// Language as entered; empty when nothing was chosen
    pub language: String,
    /// Tone as entered; empty when nothing was chosen
    pub tone: String,
}

/// The complete assistant form (both wizard steps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantForm {
    #[serde(flatten)]
    pub basic: BasicInfo,
    pub response_length: ResponseLength,
    #[serde(default)]
    pub audio_enabled: bool,
}

impl Default for AssistantForm {
    fn default() -> Self {
        Self {
            basic: BasicInfo::default(),
            response_length: ResponseLength::default(),
            audio_enabled: false,
        }
    }
}

impl AssistantForm {
    /// Runs both wizard steps' validation and merges the results.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = validate_basic_info(&self.basic);
        errors.merge(validate_response_mix(&self.response_length));
        errors
    }

    /// Converts a valid form into a creation request.
    ///
    /// Returns the validation errors instead when the form is not valid.
    pub fn into_request(self) -> Result<CreateAssistantRequest, ValidationErrors> {
        let errors = self.validate();
        if has_validation_errors(&errors) {
            return Err(errors);
        }

        // Both enum fields parsed during validation
        match (
            Language::from_str(self.basic.language.trim()),
            Tone::from_str(self.basic.tone.trim()),
        ) {
            (Ok(language), Ok(tone)) => Ok(CreateAssistantRequest {
                name: self.basic.name.trim().to_string(),
                language,
                tone,
                response_length: self.response_length,
                audio_enabled: self.audio_enabled,
            }),
            _ => Err(errors),
        }
    }

    /// Prefills the form from an existing request (edit mode).
    pub fn from_request(request: &CreateAssistantRequest) -> Self {
        Self {
            basic: BasicInfo {
                name: request.name.clone(),
                language: request.language.to_string(),
                tone: request.tone.to_string(),
            },
            response_length: request.response_length,
            audio_enabled: request.audio_enabled,
        }
    }
}

/// Validates name, language and tone.
///
/// The name is required and must have at least three characters after
/// trimming. Language and tone are required and must name a known option.
pub fn validate_basic_info(info: &BasicInfo) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let name = info.name.trim();
    if name.is_empty() {
        errors.insert(FIELD_NAME, "Name is required");
    } else if name.chars().count() < MIN_NAME_CHARS {
        errors.insert(
            FIELD_NAME,
            format!("Name must be at least {} characters", MIN_NAME_CHARS),
        );
    }

    let language = info.language.trim();
    if language.is_empty() {
        errors.insert(FIELD_LANGUAGE, "Language is required");
    } else if Language::from_str(language).is_err() {
        errors.insert(
            FIELD_LANGUAGE,
            format!("Language must be one of: {}", join_options(&Language::options())),
        );
    }

    let tone = info.tone.trim();
    if tone.is_empty() {
        errors.insert(FIELD_TONE, "Tone is required");
    } else if Tone::from_str(tone).is_err() {
        errors.insert(
            FIELD_TONE,
            format!("Tone must be one of: {}", join_options(&Tone::options())),
        );
    }

    errors
}

/// Validates the short/medium/long percentage mix.
///
/// At most one message is reported under `responseLength`. Checks run in a
/// fixed order and the first failure wins: negative values, then values
/// above 100, then a total other than 100.
pub fn validate_response_mix(mix: &ResponseLength) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let values = [mix.short, mix.medium, mix.long];

    if values.iter().any(|v| *v < 0) {
        errors.insert(FIELD_RESPONSE_LENGTH, "Values cannot be negative");
    } else if values.iter().any(|v| *v > 100) {
        errors.insert(FIELD_RESPONSE_LENGTH, "No value can exceed 100%");
    } else if mix.total() != 100 {
        errors.insert(
            FIELD_RESPONSE_LENGTH,
            format!(
                "Percentages must add up to 100% (currently: {}%)",
                mix.total()
            ),
        );
    }

    errors
}

/// Validates training rules as enforced by the training editor.
///
/// The repository itself accepts any text.
pub fn validate_training_rules(rules: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let length = rules.trim().chars().count();

    if length < MIN_RULES_CHARS {
        errors.insert(
            FIELD_RULES,
            format!("Training rules must be at least {} characters", MIN_RULES_CHARS),
        );
    } else if length > MAX_RULES_CHARS {
        errors.insert(
            FIELD_RULES,
            format!("Training rules cannot exceed {} characters", MAX_RULES_CHARS),
        );
    }

    errors
}

/// True iff the map has at least one entry.
pub fn has_validation_errors(errors: &ValidationErrors) -> bool {
    !errors.is_empty()
}

/// Percentage still to distribute; negative when the mix is over 100.
pub fn remaining_percentage(mix: &ResponseLength) -> i64 {
    100 - mix.total()
}

fn join_options<T: ToString>(options: &[T]) -> String {
    options
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(name: &str, language: &str, tone: &str) -> BasicInfo {
        BasicInfo {
            name: name.to_string(),
            language: language.to_string(),
            tone: tone.to_string(),
        }
    }

    #[test]
    fn test_valid_basic_info() {
        let errors = validate_basic_info(&basic("Sales Bot", "English", "Formal"));
        assert!(!has_validation_errors(&errors));
    }

    #[test]
    fn test_short_name_is_rejected() {
        let errors = validate_basic_info(&basic("Al", "English", "Formal"));
        assert!(errors.contains(FIELD_NAME));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FIELD_NAME), Some("Name must be at least 3 characters"));
    }

    #[test]
    fn test_name_is_trimmed_before_length_check() {
        let errors = validate_basic_info(&basic("  Al  ", "English", "Formal"));
        assert!(errors.contains(FIELD_NAME));

        let errors = validate_basic_info(&basic("   ", "English", "Formal"));
        assert_eq!(errors.get(FIELD_NAME), Some("Name is required"));
    }

    #[test]
    fn test_missing_and_unknown_enums() {
        let errors = validate_basic_info(&basic("Sales Bot", "", ""));
        assert_eq!(errors.get(FIELD_LANGUAGE), Some("Language is required"));
        assert_eq!(errors.get(FIELD_TONE), Some("Tone is required"));

        let errors = validate_basic_info(&basic("Sales Bot", "Klingon", "Sarcastic"));
        assert_eq!(
            errors.get(FIELD_LANGUAGE),
            Some("Language must be one of: Spanish, English, Portuguese")
        );
        assert!(errors.contains(FIELD_TONE));
    }

    #[test]
    fn test_legacy_labels_are_accepted() {
        let errors = validate_basic_info(&basic("Ventas", "Español", "Amigable"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_response_mix_summing_to_100() {
        assert!(validate_response_mix(&ResponseLength::new(30, 40, 30)).is_empty());
        assert!(validate_response_mix(&ResponseLength::new(100, 0, 0)).is_empty());
    }

    #[test]
    fn test_response_mix_wrong_total() {
        let errors = validate_response_mix(&ResponseLength::new(50, 50, 10));
        assert!(has_validation_errors(&errors));
        assert_eq!(
            errors.get(FIELD_RESPONSE_LENGTH),
            Some("Percentages must add up to 100% (currently: 110%)")
        );
    }

    #[test]
    fn test_response_mix_precedence() {
        // Negative wins over the >100 and total checks
        let errors = validate_response_mix(&ResponseLength::new(-10, 150, 0));
        assert_eq!(errors.get(FIELD_RESPONSE_LENGTH), Some("Values cannot be negative"));

        // >100 wins over the total check
        let errors = validate_response_mix(&ResponseLength::new(120, 0, 0));
        assert_eq!(errors.get(FIELD_RESPONSE_LENGTH), Some("No value can exceed 100%"));

        // Negative values that still add up to 100 are rejected
        let errors = validate_response_mix(&ResponseLength::new(-20, 60, 60));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FIELD_RESPONSE_LENGTH), Some("Values cannot be negative"));
    }

    #[test]
    fn test_remaining_percentage() {
        assert_eq!(remaining_percentage(&ResponseLength::new(30, 40, 30)), 0);
        assert_eq!(remaining_percentage(&ResponseLength::new(10, 20, 30)), 40);
        assert_eq!(remaining_percentage(&ResponseLength::new(50, 50, 10)), -10);
    }

    #[test]
    fn test_remaining_percentage_extreme_input() {
        assert_eq!(
            remaining_percentage(&ResponseLength::new(i32::MAX, 1, 0)),
            100 - i64::from(i32::MAX) - 1
        );
        assert_eq!(
            remaining_percentage(&ResponseLength::new(i32::MIN, i32::MIN, 0)),
            100 - 2 * i64::from(i32::MIN)
        );
    }

    #[test]
    fn test_training_rules_bounds() {
        assert!(validate_training_rules("Be concise.").contains(FIELD_RULES));
        assert!(validate_training_rules("Always greet the customer by name.").is_empty());
        assert!(validate_training_rules(&"x".repeat(MAX_RULES_CHARS + 1)).contains(FIELD_RULES));
        assert!(validate_training_rules(&"x".repeat(MAX_RULES_CHARS)).is_empty());
    }

    #[test]
    fn test_form_into_request() {
        let form = AssistantForm {
            basic: basic("  Sales Bot ", "english", "formal"),
            response_length: ResponseLength::new(30, 40, 30),
            audio_enabled: true,
        };

        let request = form.into_request().unwrap();
        assert_eq!(request.name, "Sales Bot");
        assert_eq!(request.language, Language::English);
        assert_eq!(request.tone, Tone::Formal);
        assert!(request.audio_enabled);
    }

    #[test]
    fn test_invalid_form_returns_all_step_errors() {
        let form = AssistantForm {
            basic: basic("Al", "", "Formal"),
            response_length: ResponseLength::new(50, 50, 10),
            audio_enabled: false,
        };

        let errors = form.into_request().unwrap_err();
        assert!(errors.contains(FIELD_NAME));
        assert!(errors.contains(FIELD_LANGUAGE));
        assert!(errors.contains(FIELD_RESPONSE_LENGTH));
        assert!(!errors.contains(FIELD_TONE));
    }

    #[test]
    fn test_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.insert(FIELD_TONE, "Tone is required");
        errors.insert(FIELD_NAME, "Name is required");
        assert_eq!(errors.to_string(), "name: Name is required; tone: Tone is required");
    }
}
