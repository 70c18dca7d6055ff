//! Draft state of the training rules editor.

/// Tracks an edited rules draft against the last saved text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingEditor {
    saved: String,
    draft: String,
}

impl TrainingEditor {
    /// Opens the editor on the assistant's current rules.
    pub fn new(saved: impl Into<String>) -> Self {
        let saved = saved.into();
        Self {
            draft: saved.clone(),
            saved,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn saved(&self) -> &str {
        &self.saved
    }

    /// Saving is only offered while the draft differs from the saved text.
    pub fn has_unsaved_changes(&self) -> bool {
        self.draft != self.saved
    }

    pub fn edit(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Drops the draft and returns to the saved text.
    pub fn discard(&mut self) {
        self.draft = self.saved.clone();
    }

    /// Records that the current draft was persisted.
    pub fn mark_saved(&mut self) {
        self.saved = self.draft.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_changes() {
        let mut editor = TrainingEditor::new("Be concise.");
        assert!(!editor.has_unsaved_changes());

        editor.edit("Be concise and friendly.");
        assert!(editor.has_unsaved_changes());
        assert_eq!(editor.saved(), "Be concise.");

        editor.mark_saved();
        assert!(!editor.has_unsaved_changes());
        assert_eq!(editor.saved(), "Be concise and friendly.");
    }

    #[test]
    fn test_discard_restores_saved_text() {
        let mut editor = TrainingEditor::new("");
        editor.edit("Draft text");

        editor.discard();

        assert_eq!(editor.draft(), "");
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_editing_back_to_saved_text_is_clean() {
        let mut editor = TrainingEditor::new("Rules");
        editor.edit("Rules!");
        editor.edit("Rules");

        assert!(!editor.has_unsaved_changes());
    }
}
