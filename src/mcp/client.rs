//! MCP tool-server client: tool listing and invocation.

use super::error::{McpError, McpResult};
use super::transport::HttpTransport;
use crate::tools::ToolRegistry;
use crate::types::ToolDescriptor;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Async client for a streamable-HTTP MCP server.
#[derive(Debug, Clone)]
pub struct McpClient {
    transport: HttpTransport,
}

impl McpClient {
    /// Create a client for the given endpoint URL.
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            transport: HttpTransport::new(url).with_timeout(timeout),
        }
    }

    pub fn url(&self) -> &str {
        self.transport.url()
    }

    /// Retrieve the tools the server currently exposes. Never returns null:
    /// an empty or absent result yields an empty list.
    pub async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        let result = self.transport.send_json_rpc("tools/list", json!({})).await?;
        let tools = tools_from_result(result)?;
        debug!("MCP server lists {} tools", tools.len());
        Ok(tools)
    }

    /// Call a named tool and return its raw JSON result.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<Value> {
        debug!("MCP tools/call {}", name);
        self.transport
            .send_json_rpc(
                "tools/call",
                json!({
                    "name": name,
                    "arguments": arguments,
                }),
            )
            .await
    }
}

/// Accept both a bare array of descriptors and the `{"tools": [...]}` shape.
fn tools_from_result(result: Value) -> McpResult<Vec<ToolDescriptor>> {
    let list = match result {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("tools") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    list.into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| McpError::Parse(format!("invalid tool descriptor: {}", e)))
        })
        .collect()
}

#[async_trait]
impl ToolRegistry for McpClient {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        McpClient::list_tools(self).await
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<Value> {
        McpClient::call_tool(self, name, arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;

    fn client(server: &MockServer) -> McpClient {
        McpClient::new(&server.url("/mcp"), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn list_tools_accepts_bare_array() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/mcp").body_contains("tools/list");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "result": [
                    {"name": "order_status", "description": "Order and shipping status"},
                    {"name": "warranty_info", "description": "Warranty information"}
                ]
            }));
        });

        let tools = client(&server).list_tools().await.unwrap();

        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "order_status");
        assert_eq!(tools[1].description, "Warranty information");
    }

    #[tokio::test]
    async fn list_tools_accepts_mcp_tools_object() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/mcp");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "result": {"tools": [
                    {"name": "create_ticket", "description": "Open a support ticket",
                     "inputSchema": {"type": "object"}}
                ]}
            }));
        });

        let tools = client(&server).list_tools().await.unwrap();

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "create_ticket");
        assert!(tools[0].extra.contains_key("inputSchema"));
    }

    #[tokio::test]
    async fn list_tools_without_result_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/mcp");
            then.status(200).json_body(json!({"jsonrpc": "2.0"}));
        });

        let tools = client(&server).list_tools().await.unwrap();
        assert!(tools.is_empty());
    }

    #[tokio::test]
    async fn call_tool_sends_name_and_arguments() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/mcp")
                .body_contains(r#""method":"tools/call""#)
                .body_contains(r#""name":"order_status""#)
                .body_contains(r#""arguments":{"query":"where is my order"}"#);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "result": {"status": "shipped"}
            }));
        });

        let result = client(&server)
            .call_tool("order_status", json!({"query": "where is my order"}))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(result, json!({"status": "shipped"}));
    }

    #[tokio::test]
    async fn call_tool_propagates_protocol_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/mcp");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "error": {"code": -32000, "message": "order not found"}
            }));
        });

        let err = client(&server)
            .call_tool("order_status", json!({"query": "?"}))
            .await
            .unwrap_err();

        assert!(matches!(err, McpError::Protocol { code: -32000, .. }));
    }
}
