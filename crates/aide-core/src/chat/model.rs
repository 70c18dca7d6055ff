use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assistant::generate_assistant_id;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Assistant,
}

/// A single message in the simulated chat.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: ChatSender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: ChatSender, content: impl Into<String>) -> Self {
        Self {
            // Same time+random scheme as assistant ids
            id: generate_assistant_id(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(ChatSender::User, content)
    }

    pub fn from_assistant(content: impl Into<String>) -> Self {
        Self::new(ChatSender::Assistant, content)
    }
}
