//! Message list assembly for an inference call.
//!
//! The tool context for a turn is injected as a transient system message at
//! the end of the list. It is never written back into the session history.

use crate::types::*;
use tracing::debug;

/// Wrap a tool context string in the instruction handed to the model.
pub fn tool_context_message(tool_context: &str) -> ChatMessage {
    ChatMessage::system(format!(
        "Tool results for this user query (JSON): {}. \
         Use this information when answering. If tool failed, \
         explain limitations briefly.",
        tool_context
    ))
}

/// Build the full message list for an inference call from the persistent
/// history plus an optional (possibly empty) tool context.
pub fn build_messages(history: &[ChatMessage], tool_context: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.extend_from_slice(history);

    if !tool_context.is_empty() {
        messages.push(tool_context_message(tool_context));
    }

    debug!("Assembled {} messages for inference", messages.len());
    messages
}
