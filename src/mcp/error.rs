use thiserror::Error;

/// Failures raised by the MCP transport and the registry calls built on it.
#[derive(Debug, Error)]
pub enum McpError {
    /// Connectivity failure, per-attempt timeout, or a non-406 HTTP error status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Every Accept header candidate was rejected with 406 Not Acceptable.
    #[error("content negotiation failed: server rejected Accept headers {tried:?}")]
    Negotiation { tried: Vec<String> },

    /// The server answered with a JSON-RPC error object.
    #[error("JSON-RPC error {code}: {message}")]
    Protocol { code: i64, message: String },

    /// The body was not exactly one well-formed JSON-RPC message.
    #[error("malformed response: {0}")]
    Parse(String),
}

impl McpError {
    pub(crate) fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub(crate) fn parse(err: impl std::fmt::Display) -> Self {
        Self::Parse(err.to_string())
    }
}

pub type McpResult<T> = Result<T, McpError>;
