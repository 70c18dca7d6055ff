use super::context::ConsoleContext;
use aide_application::{ConsoleOutcome, TrainingEditor};
use aide_core::AideError;
use aide_core::assistant::{Assistant, CreateAssistantRequest, ResponseLength};
use aide_core::validation::{AssistantForm, BasicInfo, ValidationErrors};
use anyhow::{Result, bail};
use clap::Args;

#[derive(Args)]
pub struct AssistantFields {
    #[arg(long)]
    pub name: String,
    /// Spanish, English or Portuguese
    #[arg(long)]
    pub language: String,
    /// Formal, Casual, Professional or Friendly
    #[arg(long)]
    pub tone: String,
    /// Share of short replies, in percent
    #[arg(long, allow_negative_numbers = true)]
    pub short: i32,
    #[arg(long, allow_negative_numbers = true)]
    pub medium: i32,
    #[arg(long, allow_negative_numbers = true)]
    pub long: i32,
    /// Enable audio replies
    #[arg(long)]
    pub audio: bool,
}

impl AssistantFields {
    fn into_form(self) -> AssistantForm {
        AssistantForm {
            basic: BasicInfo {
                name: self.name,
                language: self.language,
                tone: self.tone,
            },
            response_length: ResponseLength::new(self.short, self.medium, self.long),
            audio_enabled: self.audio,
        }
    }
}

#[derive(Args)]
pub struct AssistantUpdateFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub tone: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub short: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub medium: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub long: Option<i32>,
    /// true or false
    #[arg(long)]
    pub audio: Option<bool>,
}

impl AssistantUpdateFields {
    /// Prefills the edit form from `current` and overlays the given flags.
    fn into_form(self, current: &Assistant) -> AssistantForm {
        let mut form = AssistantForm::from_request(&CreateAssistantRequest::from_assistant(current));

        if let Some(name) = self.name {
            form.basic.name = name;
        }
        if let Some(language) = self.language {
            form.basic.language = language;
        }
        if let Some(tone) = self.tone {
            form.basic.tone = tone;
        }
        if let Some(short) = self.short {
            form.response_length.short = short;
        }
        if let Some(medium) = self.medium {
            form.response_length.medium = medium;
        }
        if let Some(long) = self.long {
            form.response_length.long = long;
        }
        if let Some(audio) = self.audio {
            form.audio_enabled = audio;
        }
        form
    }
}

pub async fn list(context: &ConsoleContext, json: bool) -> Result<()> {
    let assistants = context.console.list().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&assistants)?);
        return Ok(());
    }

    if assistants.is_empty() {
        println!("No assistants yet. Create one with `aide create`.");
        return Ok(());
    }

    for assistant in &assistants {
        print_summary(assistant);
    }
    Ok(())
}

pub async fn show(context: &ConsoleContext, id: &str) -> Result<()> {
    let Some(assistant) = context.console.get(id).await else {
        return Err(not_found(id));
    };

    print_summary(&assistant);
    println!("  audio:     {}", if assistant.audio_enabled { "on" } else { "off" });
    if assistant.is_trained() {
        println!("  rules:");
        for line in assistant.rules.lines() {
            println!("    {}", line);
        }
    } else {
        println!("  rules:     (not trained)");
    }
    Ok(())
}

pub async fn create(context: &ConsoleContext, fields: AssistantFields) -> Result<()> {
    match context.console.create(fields.into_form()).await {
        ConsoleOutcome::Saved(assistant) => {
            println!("Created assistant {}", assistant.id);
            print_summary(&assistant);
            Ok(())
        }
        ConsoleOutcome::Invalid(errors) => invalid(&errors),
        ConsoleOutcome::NotFound => bail!("Assistant could not be created"),
    }
}

pub async fn update(
    context: &ConsoleContext,
    id: &str,
    fields: AssistantUpdateFields,
) -> Result<()> {
    let Some(current) = context.console.get(id).await else {
        return Err(not_found(id));
    };

    match context.console.edit(id, fields.into_form(&current)).await {
        ConsoleOutcome::Saved(assistant) => {
            println!("Updated assistant {}", assistant.id);
            print_summary(&assistant);
            Ok(())
        }
        ConsoleOutcome::Invalid(errors) => invalid(&errors),
        ConsoleOutcome::NotFound => Err(not_found(id)),
    }
}

pub async fn delete(context: &ConsoleContext, id: &str) -> Result<()> {
    match context.console.remove(id).await {
        ConsoleOutcome::Saved(()) => {
            println!("Deleted assistant {}", id);
            Ok(())
        }
        ConsoleOutcome::Invalid(errors) => invalid(&errors),
        ConsoleOutcome::NotFound => Err(not_found(id)),
    }
}

pub async fn train(context: &ConsoleContext, id: &str, rules: &str) -> Result<()> {
    let Some(current) = context.console.get(id).await else {
        return Err(not_found(id));
    };

    let mut editor = TrainingEditor::new(current.rules);
    editor.edit(rules);

    match context.console.save_training_draft(id, &mut editor).await {
        ConsoleOutcome::Saved(true) => {
            println!("Training saved for {}", id);
            Ok(())
        }
        ConsoleOutcome::Saved(false) => {
            println!("No changes to save for {}", id);
            Ok(())
        }
        ConsoleOutcome::Invalid(errors) => invalid(&errors),
        ConsoleOutcome::NotFound => Err(not_found(id)),
    }
}

pub async fn reset(context: &ConsoleContext) -> Result<()> {
    let repository = context.console.repository();
    repository.wait_until_loaded().await;
    repository.clear().await;

    println!(
        "Removed stored assistants under '{}' ({} remaining)",
        context.config.storage_key,
        repository.list().await.len()
    );
    Ok(())
}

fn print_summary(assistant: &Assistant) {
    let mix = assistant.response_length;
    println!(
        "{}  {}  [{} / {}]  short {}% medium {}% long {}%{}",
        assistant.id,
        assistant.name,
        assistant.language,
        assistant.tone,
        mix.short,
        mix.medium,
        mix.long,
        if assistant.is_trained() { "  trained" } else { "" }
    );
}

fn not_found(id: &str) -> anyhow::Error {
    AideError::not_found("Assistant", id).into()
}

fn invalid(errors: &ValidationErrors) -> Result<()> {
    eprintln!("Invalid input:");
    for (field, message) in errors.iter() {
        eprintln!("  {}: {}", field, message);
    }
    bail!("{} field(s) failed validation", errors.len())
}
