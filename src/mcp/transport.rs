//! Streamable-HTTP transport for JSON-RPC calls to the MCP server.
//!
//! Each call is a single POST whose body is streamed, buffered whole and then
//! decoded. Servers that do strict content negotiation may answer 406 for a
//! given `Accept` value, so the request is retried with the next candidate.

use super::error::{McpError, McpResult};
use super::jsonrpc::{self, JsonRpcRequest};
use futures::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

/// Accept header values, tried in this order.
pub const ACCEPT_CANDIDATES: [&str; 3] = [
    "application/json, text/event-stream",
    "text/event-stream",
    "application/json",
];

/// Default bound on each HTTP attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// JSON-RPC over streamable HTTP, bound to one endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    url: String,
    timeout: Duration,
    http: reqwest::Client,
}

enum Attempt {
    Body(String),
    NotAcceptable,
}

impl HttpTransport {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            timeout: DEFAULT_TIMEOUT,
            http: reqwest::Client::new(),
        }
    }

    /// Bound each HTTP attempt (not the whole fallback sequence).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one JSON-RPC request and return its `result`.
    pub async fn send_json_rpc(&self, method: &str, params: Value) -> McpResult<Value> {
        let request = JsonRpcRequest::new(method, &params);
        debug!("MCP request {} (id={})", method, request.id);

        let body = self.post_with_fallback(&request).await?;
        trace!("MCP response body: {}", body);

        jsonrpc::decode_response(&body, &request.id)
    }

    async fn post_with_fallback(&self, request: &JsonRpcRequest<'_>) -> McpResult<String> {
        for accept in ACCEPT_CANDIDATES {
            match self.post_once(request, accept).await? {
                Attempt::Body(body) => return Ok(body),
                Attempt::NotAcceptable => {
                    debug!("Server rejected Accept '{}' with 406, trying next", accept);
                }
            }
        }

        Err(McpError::Negotiation {
            tried: ACCEPT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
        })
    }

    async fn post_once(&self, request: &JsonRpcRequest<'_>, accept: &str) -> McpResult<Attempt> {
        let resp = self
            .http
            .post(&self.url)
            .header(ACCEPT, accept)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = resp.status();
        if status == StatusCode::NOT_ACCEPTABLE {
            return Ok(Attempt::NotAcceptable);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(McpError::Transport(format!(
                "MCP server returned {}: {}",
                status, body
            )));
        }

        let mut stream = resp.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| self.request_error(e))?;
            buf.extend_from_slice(&chunk);
        }

        String::from_utf8(buf)
            .map(Attempt::Body)
            .map_err(McpError::parse)
    }

    fn request_error(&self, err: reqwest::Error) -> McpError {
        if err.is_timeout() {
            McpError::Transport(format!(
                "request to {} timed out after {:?}",
                self.url, self.timeout
            ))
        } else {
            McpError::transport(err)
        }
    }
}
