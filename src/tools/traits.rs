//! Seams between the orchestrator and its collaborators.

use crate::mcp::error::McpResult;
use crate::types::ToolDescriptor;
use anyhow::Result;
use async_trait::async_trait;

/// A source of remote tools: lists the catalog and invokes tools by name.
#[async_trait]
pub trait ToolRegistry: Send + Sync {
    /// Current tool catalog. Fetched fresh on every call.
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>>;

    /// Invoke a tool and return its raw JSON result.
    async fn call_tool(&self, name: &str, arguments: serde_json::Value)
        -> McpResult<serde_json::Value>;
}

/// Picks which tool (if any) should answer a query.
///
/// Returns the index into `tools` of the chosen tool, or `None` when no tool
/// is a confident match.
#[async_trait]
pub trait ToolSelector: Send + Sync {
    async fn select(&self, query: &str, tools: &[ToolDescriptor]) -> Result<Option<usize>>;
}
