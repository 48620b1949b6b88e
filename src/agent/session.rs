//! In-memory conversation state for one chat session.

use crate::types::{ChatMessage, ChatRole};

/// Ordered, append-only conversation history. The first entry is always the
/// persistent system prompt; `reset` drops everything after it.
#[derive(Debug, Clone)]
pub struct Session {
    history: Vec<ChatMessage>,
}

impl Session {
    pub fn new(system_prompt: &str) -> Self {
        Self {
            history: vec![ChatMessage::system(system_prompt)],
        }
    }

    /// Clear the conversation, keeping only the initial system prompt.
    pub fn reset(&mut self) {
        self.history.truncate(1);
    }

    pub fn push_user(&mut self, content: &str) {
        self.history.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: &str) {
        self.history.push(ChatMessage::assistant(content));
    }

    /// Full history, system prompt included.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Entries a user would see in a transcript (no system messages).
    pub fn visible(&self) -> impl Iterator<Item = &ChatMessage> {
        self.history.iter().filter(|m| m.role != ChatRole::System)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
