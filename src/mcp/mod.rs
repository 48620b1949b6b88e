//! Client side of the MCP tool server: JSON-RPC 2.0 over streamable HTTP.

pub mod client;
pub mod error;
pub mod jsonrpc;
pub mod transport;

pub use client::McpClient;
pub use error::McpError;
pub use transport::HttpTransport;
