//! One user turn: tool step, message assembly, model reply.
//!
//! Network calls run strictly in sequence (list, then call, then the model).
//! Tool failures never abort a turn; a model failure does, and is returned
//! to the caller to present.

use crate::agent::context;
use crate::agent::session::Session;
use crate::llm::ChatModel;
use crate::tools::{ToolOrchestrator, ToolRegistry};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Wires the tool orchestrator, the tool registry and the language model
/// together for turn processing.
pub struct SupportAgent {
    registry: Arc<dyn ToolRegistry>,
    model: Arc<dyn ChatModel>,
    orchestrator: ToolOrchestrator,
}

impl SupportAgent {
    pub fn new(registry: Arc<dyn ToolRegistry>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            registry,
            model,
            orchestrator: ToolOrchestrator::default(),
        }
    }

    pub fn with_orchestrator(mut self, orchestrator: ToolOrchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    pub fn registry(&self) -> &dyn ToolRegistry {
        self.registry.as_ref()
    }

    /// Process one user message and return the assistant reply.
    ///
    /// The user message is appended to the session first; the reply is
    /// appended only when the model call succeeds.
    pub async fn process_turn(&self, session: &mut Session, user_input: &str) -> Result<String> {
        session.push_user(user_input);

        let tool_context = self
            .orchestrator
            .maybe_invoke_tool(user_input, self.registry.as_ref())
            .await;
        if !tool_context.is_empty() {
            info!("Tool context: {} chars", tool_context.len());
        }

        let messages = context::build_messages(session.messages(), &tool_context);
        let reply = self.model.complete(&messages).await?;

        session.push_assistant(&reply);
        Ok(reply)
    }
}
