//! Simulated chat preview.
//!
//! Replies are picked at random from a fixed list after a random delay; no
//! model is involved.

use aide_core::chat::ChatMessage;
use aide_core::config::DelayConfig;
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

pub const CANNED_RESPONSES: &[&str] = &[
    "Understood. What else can I help you with?",
    "That's a great question. Let me explain...",
    "Of course, I'd be happy to help with that.",
    "Could you give me more details about your request?",
    "Perfect, I've noted that information.",
    "Thanks for your message! I'm processing your request.",
    "Interesting point of view. Let me share my thoughts.",
    "I understand your situation. Here are some options...",
    "Excellent choice! Is there anything else you need?",
    "Let me check that for you. One moment, please.",
];

/// Message log of one chat preview.
pub struct ChatSimulator {
    messages: Mutex<Vec<ChatMessage>>,
    pending: AtomicBool,
    /// Bumped on reset; replies started before a reset are dropped.
    generation: AtomicU64,
    min_delay: Duration,
    max_delay: Duration,
}

impl ChatSimulator {
    pub fn new(delays: &DelayConfig) -> Self {
        let (min_delay, max_delay) = delays.chat_range();
        Self {
            messages: Mutex::new(Vec::new()),
            pending: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            min_delay,
            max_delay,
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock_messages().clone()
    }

    /// Whether a reply is being "typed".
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Sends a user message and waits for the simulated reply.
    ///
    /// Returns `None` without recording anything when `text` is blank or a
    /// reply is still pending. Also returns `None` if the log was reset while
    /// waiting.
    pub async fn send(&self, text: &str) -> Option<ChatMessage> {
        let content = text.trim();
        if content.is_empty() {
            return None;
        }
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Chat reply pending; ignoring message");
            return None;
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let _pending = PendingGuard {
            simulator: self,
            generation,
        };

        self.lock_messages().push(ChatMessage::from_user(content));

        tokio::time::sleep(self.reply_delay()).await;

        let reply = ChatMessage::from_assistant(random_response());
        let mut messages = self.lock_messages();
        if self.generation.load(Ordering::SeqCst) != generation {
            return None;
        }
        messages.push(reply.clone());
        Some(reply)
    }

    /// Clears the log and cancels any pending reply.
    pub fn reset(&self) {
        let mut messages = self.lock_messages();
        self.generation.fetch_add(1, Ordering::SeqCst);
        messages.clear();
        self.pending.store(false, Ordering::SeqCst);
    }

    fn reply_delay(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        rand::thread_rng().gen_range(self.min_delay..=self.max_delay)
    }

    fn lock_messages(&self) -> std::sync::MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Releases the pending flag when a send finishes or is dropped, unless a
/// reset already released it.
struct PendingGuard<'a> {
    simulator: &'a ChatSimulator,
    generation: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.simulator.generation.load(Ordering::SeqCst) == self.generation {
            self.simulator.pending.store(false, Ordering::SeqCst);
        }
    }
}

fn random_response() -> &'static str {
    CANNED_RESPONSES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("...")
}
