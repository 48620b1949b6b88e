//! Decides whether a user turn needs a remote tool, runs it, and packages
//! the outcome as a context string for the language model.
//!
//! One pass per turn: gate → list → select → invoke → package. Nothing in
//! here returns an error to the caller; every failure after the gate is
//! folded into a `Tool call failed with error: ...` string so the chat turn
//! can still complete.

use super::scorer::KeywordSelector;
use super::traits::{ToolRegistry, ToolSelector};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Words that suggest a query needs backend data. Queries without any of
/// them never touch the network.
pub const TRIGGER_WORDS: &[&str] = &[
    "order",
    "status",
    "warranty",
    "monitor",
    "printer",
    "ticket",
    "shipping",
    "delivery",
    "specification",
    "compatibility",
    "problem",
    "issue",
    "support",
    "guarantee",
    "keyboard",
    "speakers",
    "mouse",
    "headset",
];

const FAILURE_PREFIX: &str = "Tool call failed with error: ";

/// Successful invocation, serialized as the tool-context JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolInvocation {
    pub selected_tool: String,
    pub tool_result: Value,
}

impl ToolInvocation {
    /// Recover an invocation from a context string. Returns `None` for the
    /// empty string and for failure diagnostics.
    pub fn from_context(context: &str) -> Option<Self> {
        serde_json::from_str(context).ok()
    }
}

/// What happened to the tool step of a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// No trigger word, empty catalog, or no tool scored above zero.
    Skipped,
    Invoked(ToolInvocation),
    Failed(String),
}

impl ToolOutcome {
    /// Render as the opaque context string handed to the conversation
    /// assembler: `""`, the invocation JSON, or a failure diagnostic.
    pub fn to_context(&self) -> String {
        match self {
            Self::Skipped => String::new(),
            Self::Invoked(invocation) => serde_json::to_string(invocation)
                .unwrap_or_else(|e| format!("{}{}", FAILURE_PREFIX, e)),
            Self::Failed(message) => format!("{}{}", FAILURE_PREFIX, message),
        }
    }
}

/// Gate-then-select tool orchestration over a pluggable selector.
pub struct ToolOrchestrator {
    selector: Box<dyn ToolSelector>,
}

impl Default for ToolOrchestrator {
    fn default() -> Self {
        Self::new(Box::new(KeywordSelector))
    }
}

impl ToolOrchestrator {
    pub fn new(selector: Box<dyn ToolSelector>) -> Self {
        Self { selector }
    }

    /// Whether the query mentions any trigger word (case-insensitive).
    pub fn should_engage(query: &str) -> bool {
        let lower = query.to_lowercase();
        TRIGGER_WORDS.iter().any(|t| lower.contains(t))
    }

    /// Run the tool step and return its context string (possibly empty).
    pub async fn maybe_invoke_tool(&self, query: &str, registry: &dyn ToolRegistry) -> String {
        self.run(query, registry).await.to_context()
    }

    /// Run the tool step and return the typed outcome.
    pub async fn run(&self, query: &str, registry: &dyn ToolRegistry) -> ToolOutcome {
        if !Self::should_engage(query) {
            debug!("No trigger word in query, skipping tools");
            return ToolOutcome::Skipped;
        }

        match self.select_and_invoke(query, registry).await {
            Ok(Some(invocation)) => invocation.into(),
            Ok(None) => ToolOutcome::Skipped,
            Err(e) => {
                warn!("Tool step failed: {:#}", e);
                ToolOutcome::Failed(format!("{:#}", e))
            }
        }
    }

    async fn select_and_invoke(
        &self,
        query: &str,
        registry: &dyn ToolRegistry,
    ) -> anyhow::Result<Option<ToolInvocation>> {
        let tools = registry.list_tools().await?;
        debug!(
            "Available tools: {:?}",
            tools.iter().map(|t| t.name.as_str()).collect::<Vec<_>>()
        );
        if tools.is_empty() {
            return Ok(None);
        }

        let Some(tool) = self
            .selector
            .select(query, &tools)
            .await?
            .and_then(|idx| tools.get(idx))
        else {
            debug!("No tool matched the query");
            return Ok(None);
        };

        info!("Selected tool '{}'", tool.name);
        let result = registry
            .call_tool(&tool.name, json!({ "query": query }))
            .await?;

        Ok(Some(ToolInvocation {
            selected_tool: tool.name.clone(),
            tool_result: result,
        }))
    }
}

impl From<ToolInvocation> for ToolOutcome {
    fn from(invocation: ToolInvocation) -> Self {
        Self::Invoked(invocation)
    }
}

/// Run the tool step with the default keyword selector.
pub async fn maybe_invoke_tool(query: &str, registry: &dyn ToolRegistry) -> String {
    ToolOrchestrator::default()
        .maybe_invoke_tool(query, registry)
        .await
}
