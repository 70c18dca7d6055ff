//! Sample assistants.
//!
//! Used as the fallback collection when nothing has been stored yet, so a
//! fresh console has something to show.

use super::model::{Assistant, Language, ResponseLength, Tone};

const SALES_ASSISTANT_ID: &str = "mk2u7e8x8unkcixyhen";
const SUPPORT_ASSISTANT_ID: &str = "mk35akcbgnt8d18sj1";

/// Returns the sample assistants shipped with the console:
/// - **Sales Assistant**: Spanish, professional, trained for discovery-first selling
/// - **Technical Support**: English, friendly, trained for step-by-step troubleshooting
pub fn default_assistants() -> Vec<Assistant> {
    vec![
        Assistant {
            id: SALES_ASSISTANT_ID.to_string(),
            name: "Sales Assistant".to_string(),
            language: Language::Spanish,
            tone: Tone::Professional,
            response_length: ResponseLength::new(30, 50, 20),
            audio_enabled: true,
            rules: "You are an assistant specialised in sales. Always be courteous and focus on identifying the customer's needs before offering products.".to_string(),
        },
        Assistant {
            id: SUPPORT_ASSISTANT_ID.to_string(),
            name: "Technical Support".to_string(),
            language: Language::English,
            tone: Tone::Friendly,
            response_length: ResponseLength::new(20, 30, 50),
            audio_enabled: false,
            rules: "You help solve technical problems clearly and step by step. Always confirm the user has understood before moving on.".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_response_mix, validate_training_rules};

    #[test]
    fn test_presets_are_valid() {
        let presets = default_assistants();
        assert_eq!(presets.len(), 2);
        assert_ne!(presets[0].id, presets[1].id);
        for assistant in &presets {
            assert!(validate_response_mix(&assistant.response_length).is_empty());
            assert!(validate_training_rules(&assistant.rules).is_empty());
        }
    }
}
