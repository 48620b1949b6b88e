//! JSON-RPC 2.0 envelopes and response-body decoding.
//!
//! A streamed response is buffered whole before it reaches this module. The
//! body must hold exactly one JSON-RPC message, either as a plain JSON
//! document or as a single Server-Sent-Events `data:` payload.

use super::error::{McpError, McpResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Outgoing request envelope. Every request gets a fresh uuid v4 id.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: String,
    pub method: &'a str,
    pub params: &'a Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: &'a Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            method,
            params,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcErrorObject {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Decode a buffered response body and unwrap its `result`.
///
/// Fails with `Protocol` when the message carries an `error` object and
/// with `Parse` when the body is malformed, holds more than one message, or
/// answers a different request id. A missing `result` becomes `{}`.
pub fn decode_response(body: &str, request_id: &str) -> McpResult<Value> {
    let response = parse_single_message(body)?;

    if let Some(id) = response.id.as_ref().filter(|id| !id.is_null()) {
        if id.as_str() != Some(request_id) {
            return Err(McpError::Parse(format!(
                "response id {} does not match request id {}",
                id, request_id
            )));
        }
    }

    if let Some(err) = response.error {
        return Err(McpError::Protocol {
            code: err.code,
            message: err.message,
        });
    }

    Ok(response
        .result
        .unwrap_or_else(|| Value::Object(serde_json::Map::new())))
}

fn parse_single_message(body: &str) -> McpResult<JsonRpcResponse> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(McpError::Parse("empty response body".into()));
    }

    let plain_err = match serde_json::from_str::<JsonRpcResponse>(trimmed) {
        Ok(response) => return Ok(response),
        Err(e) => e,
    };

    if !looks_like_sse(trimmed) {
        return Err(McpError::parse(plain_err));
    }

    let payloads = sse_data_payloads(trimmed);
    match payloads.as_slice() {
        [only] => serde_json::from_str(only).map_err(McpError::parse),
        [] => Err(McpError::Parse("event stream carried no data".into())),
        many => Err(McpError::Parse(format!(
            "expected exactly one JSON-RPC message, stream carried {}",
            many.len()
        ))),
    }
}

fn looks_like_sse(body: &str) -> bool {
    body.lines().any(|line| line.starts_with("data:"))
}

/// Collect the `data:` payload of every event in an SSE body. Multi-line
/// data fields are joined with `\n`; events without data are skipped.
fn sse_data_payloads(body: &str) -> Vec<String> {
    let mut payloads = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in body.lines().map(|l| l.trim_end_matches('\r')) {
        if line.is_empty() {
            if !current.is_empty() {
                payloads.push(current.join("\n"));
                current.clear();
            }
            continue;
        }
        if let Some(data) = line.strip_prefix("data:") {
            current.push(data.strip_prefix(' ').unwrap_or(data));
        }
    }
    if !current.is_empty() {
        payloads.push(current.join("\n"));
    }

    payloads
}
