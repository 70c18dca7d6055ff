//! Assistant console use case.
//!
//! Coordinates form validation, the simulated confirmation delays and the
//! assistant repository, the way the management screens drive them.

use crate::training_editor::TrainingEditor;
use aide_core::assistant::{Assistant, AssistantPatch, AssistantRepository};
use aide_core::config::DelayConfig;
use aide_core::validation::{
    AssistantForm, ValidationErrors, has_validation_errors, validate_training_rules,
};
use std::sync::Arc;
use std::time::Duration;

/// Result of a console action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutcome<T> {
    /// The change was applied to the collection.
    Saved(T),
    /// Input was rejected; nothing was touched.
    Invalid(ValidationErrors),
    /// No assistant has the given id.
    NotFound,
}

impl<T> ConsoleOutcome<T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, ConsoleOutcome::Saved(_))
    }

    pub fn saved(self) -> Option<T> {
        match self {
            ConsoleOutcome::Saved(value) => Some(value),
            _ => None,
        }
    }
}

/// Use case for managing assistants from the console.
///
/// # Responsibilities
///
/// - Validating wizard forms and training text before any mutation
/// - Waiting the configured confirmation delay before committing
/// - Translating repository results into [`ConsoleOutcome`]s
pub struct AssistantConsole {
    repository: Arc<dyn AssistantRepository>,
    delays: DelayConfig,
}

impl AssistantConsole {
    pub fn new(repository: Arc<dyn AssistantRepository>, delays: DelayConfig) -> Self {
        Self { repository, delays }
    }

    pub fn repository(&self) -> &Arc<dyn AssistantRepository> {
        &self.repository
    }

    pub async fn list(&self) -> Vec<Assistant> {
        self.repository.wait_until_loaded().await;
        self.repository.list().await
    }

    pub async fn get(&self, id: &str) -> Option<Assistant> {
        self.repository.wait_until_loaded().await;
        self.repository.get(id).await
    }

    /// Validates the creation wizard and appends a new assistant.
    pub async fn create(&self, form: AssistantForm) -> ConsoleOutcome<Assistant> {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(errors) => return ConsoleOutcome::Invalid(errors),
        };

        pause(self.delays.save()).await;
        ConsoleOutcome::Saved(self.repository.create(request).await)
    }

    /// Validates the edit wizard and replaces the assistant's settings.
    ///
    /// Training rules are left as they are.
    pub async fn edit(&self, id: &str, form: AssistantForm) -> ConsoleOutcome<Assistant> {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(errors) => return ConsoleOutcome::Invalid(errors),
        };

        pause(self.delays.save()).await;
        if !self
            .repository
            .update(id, AssistantPatch::from_request(request))
            .await
        {
            return ConsoleOutcome::NotFound;
        }

        match self.repository.get(id).await {
            Some(updated) => ConsoleOutcome::Saved(updated),
            // Removed concurrently between update and read
            None => ConsoleOutcome::NotFound,
        }
    }

    pub async fn remove(&self, id: &str) -> ConsoleOutcome<()> {
        pause(self.delays.delete()).await;
        if self.repository.delete(id).await {
            ConsoleOutcome::Saved(())
        } else {
            ConsoleOutcome::NotFound
        }
    }

    /// Validates and stores new training rules for an assistant.
    pub async fn save_training(&self, id: &str, rules: &str) -> ConsoleOutcome<()> {
        let errors = validate_training_rules(rules);
        if has_validation_errors(&errors) {
            return ConsoleOutcome::Invalid(errors);
        }

        pause(self.delays.training()).await;
        if self.repository.update_training(id, rules).await {
            ConsoleOutcome::Saved(())
        } else {
            ConsoleOutcome::NotFound
        }
    }

    /// Saves the editor's draft when it differs from the saved rules.
    ///
    /// Yields `Saved(false)` without touching storage for an unchanged
    /// draft. On success the editor is marked saved.
    pub async fn save_training_draft(
        &self,
        id: &str,
        editor: &mut TrainingEditor,
    ) -> ConsoleOutcome<bool> {
        if !editor.has_unsaved_changes() {
            return ConsoleOutcome::Saved(false);
        }

        match self.save_training(id, editor.draft()).await {
            ConsoleOutcome::Saved(()) => {
                editor.mark_saved();
                ConsoleOutcome::Saved(true)
            }
            ConsoleOutcome::Invalid(errors) => ConsoleOutcome::Invalid(errors),
            ConsoleOutcome::NotFound => ConsoleOutcome::NotFound,
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aide_core::assistant::{ResponseLength, default_assistants};
    use aide_core::validation::{BasicInfo, FIELD_NAME, FIELD_RESPONSE_LENGTH, FIELD_RULES};
    use aide_infrastructure::{LocalStorage, LocalStorageAssistantRepository, MemoryKeyValueStore};

    fn console_with(fallback: Vec<Assistant>, delays: DelayConfig) -> AssistantConsole {
        let storage = LocalStorage::new(Arc::new(MemoryKeyValueStore::new()));
        let repo = LocalStorageAssistantRepository::new(&storage, "aide_assistants", fallback).unwrap();
        AssistantConsole::new(Arc::new(repo), delays)
    }

    fn form(name: &str, mix: ResponseLength) -> AssistantForm {
        AssistantForm {
            basic: BasicInfo {
                name: name.to_string(),
                language: "english".to_string(),
                tone: "Formal".to_string(),
            },
            response_length: mix,
            audio_enabled: true,
        }
    }

    #[tokio::test]
    async fn test_create_valid_form() {
        let console = console_with(Vec::new(), DelayConfig::none());

        let outcome = console
            .create(form("  Sales Bot  ", ResponseLength::new(30, 40, 30)))
            .await;

        let created = outcome.saved().unwrap();
        assert_eq!(created.name, "Sales Bot");
        assert_eq!(created.rules, "");
        assert_eq!(console.list().await, vec![created]);
    }

    #[tokio::test]
    async fn test_invalid_form_touches_nothing() {
        let console = console_with(default_assistants(), DelayConfig::none());

        let outcome = console.create(form("Al", ResponseLength::new(50, 50, 10))).await;

        let ConsoleOutcome::Invalid(errors) = outcome else {
            panic!("expected validation errors");
        };
        assert!(errors.contains(FIELD_NAME));
        assert!(errors.contains(FIELD_RESPONSE_LENGTH));
        assert_eq!(console.list().await, default_assistants());
    }

    #[tokio::test]
    async fn test_edit_keeps_rules() {
        let console = console_with(default_assistants(), DelayConfig::none());
        let original = default_assistants().remove(0);

        let outcome = console
            .edit(&original.id, form("Sales Desk", ResponseLength::new(10, 80, 10)))
            .await;

        let updated = outcome.saved().unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, "Sales Desk");
        assert_eq!(updated.rules, original.rules);
    }

    #[tokio::test]
    async fn test_edit_and_remove_unknown_id() {
        let console = console_with(default_assistants(), DelayConfig::none());

        let outcome = console.edit("nope", form("Valid", ResponseLength::default())).await;
        assert_eq!(outcome, ConsoleOutcome::NotFound);
        assert_eq!(console.remove("nope").await, ConsoleOutcome::NotFound);
        assert_eq!(console.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_save_training_validates_length() {
        let console = console_with(default_assistants(), DelayConfig::none());
        let id = default_assistants()[0].id.clone();

        let ConsoleOutcome::Invalid(errors) = console.save_training(&id, "too short").await else {
            panic!("expected validation errors");
        };
        assert!(errors.contains(FIELD_RULES));

        let rules = "Always greet the customer by name.";
        assert!(console.save_training(&id, rules).await.is_saved());
        assert_eq!(console.get(&id).await.unwrap().rules, rules);
    }

    #[tokio::test]
    async fn test_save_training_draft_skips_unchanged_rules() {
        let console = console_with(default_assistants(), DelayConfig::none());
        let current = default_assistants().remove(0);
        let mut editor = TrainingEditor::new(current.rules.clone());

        assert_eq!(
            console.save_training_draft(&current.id, &mut editor).await,
            ConsoleOutcome::Saved(false)
        );

        let rules = "Answer in two sentences at most.";
        editor.edit(rules);
        assert_eq!(
            console.save_training_draft(&current.id, &mut editor).await,
            ConsoleOutcome::Saved(true)
        );
        assert!(!editor.has_unsaved_changes());
        assert_eq!(editor.saved(), rules);
        assert_eq!(console.get(&current.id).await.unwrap().rules, rules);
    }

    #[tokio::test]
    async fn test_save_training_draft_keeps_rejected_draft() {
        let console = console_with(default_assistants(), DelayConfig::none());
        let current = default_assistants().remove(0);
        let mut editor = TrainingEditor::new(current.rules.clone());
        editor.edit("short");

        let outcome = console.save_training_draft(&current.id, &mut editor).await;

        assert!(matches!(outcome, ConsoleOutcome::Invalid(_)));
        assert!(editor.has_unsaved_changes());
        assert_eq!(console.get(&current.id).await.unwrap().rules, current.rules);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_waits_for_delete_delay() {
        let console = console_with(default_assistants(), DelayConfig::default());
        let id = default_assistants()[1].id.clone();
        let started = tokio::time::Instant::now();

        assert!(console.remove(&id).await.is_saved());

        assert!(started.elapsed() >= Duration::from_millis(500));
        assert!(console.get(&id).await.is_none());
    }
}
