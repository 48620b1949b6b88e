//! Supportbot — customer-support chat assistant for computer products.
//!
//! Each user turn may consult a remote MCP tool server (order status,
//! product specs, warranty, tickets). A keyword heuristic decides whether a
//! tool is needed and which one; the tool's JSON result is injected into the
//! model's context before the answer is generated.

pub mod agent;
pub mod config;
pub mod llm;
pub mod mcp;
pub mod tools;
pub mod types;
