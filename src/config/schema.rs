//! Configuration schema for supportbot.toml.

use crate::llm::inference::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fallback MCP endpoint when neither the file nor `MCP_SERVER_URL` sets one.
pub const DEFAULT_MCP_URL: &str = "https://vipfapwm3x.us-east-1.awsapprunner.com/mcp";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// MCP tool server endpoint (JSON-RPC over streamable HTTP).
    pub mcp_server_url: String,

    /// Bound on each HTTP attempt to the tool server, in seconds.
    pub mcp_timeout_secs: u64,

    /// Base URL of the OpenAI-compatible chat completions API.
    pub openai_api_url: String,

    /// API key for the chat completions API.
    pub openai_api_key: String,

    /// Chat model.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f64,

    /// Persistent system prompt. Blank means the built-in support persona.
    pub system_prompt: String,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            mcp_server_url: DEFAULT_MCP_URL.into(),
            mcp_timeout_secs: 60,
            openai_api_url: "https://api.openai.com".into(),
            openai_api_key: String::new(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: String::new(),
            log_level: "info".into(),
        }
    }
}

impl SupportConfig {
    pub fn mcp_timeout(&self) -> Duration {
        Duration::from_secs(self.mcp_timeout_secs)
    }

    /// Apply environment overrides. Unset or blank variables are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("MCP_SERVER_URL") {
            self.mcp_server_url = url;
        }
        if let Some(key) = get("OPENAI_API_KEY") {
            self.openai_api_key = key;
        }
        if let Some(url) = get("OPENAI_BASE_URL") {
            self.openai_api_url = url;
        }
        if let Some(model) = get("SUPPORTBOT_MODEL") {
            self.model = model;
        }
    }

    /// API key masked for display.
    pub fn redacted_api_key(&self) -> String {
        let chars: Vec<char> = self.openai_api_key.trim().chars().collect();
        if chars.is_empty() {
            "(not set)".into()
        } else if chars.len() <= 8 {
            "****".into()
        } else {
            let head: String = chars[..3].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}****{}", head, tail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("MCP_SERVER_URL", "http://localhost:8000/mcp"),
            ("OPENAI_API_KEY", "sk-from-env"),
            ("SUPPORTBOT_MODEL", ""),
        ]
        .into_iter()
        .collect();

        let mut cfg = SupportConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.mcp_server_url, "http://localhost:8000/mcp");
        assert_eq!(cfg.openai_api_key, "sk-from-env");
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.openai_api_url, "https://api.openai.com");
    }

    #[test]
    fn defaults_point_at_documented_endpoint() {
        let cfg = SupportConfig::default();
        assert_eq!(cfg.mcp_server_url, DEFAULT_MCP_URL);
        assert_eq!(cfg.mcp_timeout(), Duration::from_secs(60));
        assert_eq!(cfg.temperature, 0.3);
    }

    #[test]
    fn api_key_is_masked() {
        let mut cfg = SupportConfig::default();
        assert_eq!(cfg.redacted_api_key(), "(not set)");
        cfg.openai_api_key = "sk-abcdefghijklmnop".into();
        assert_eq!(cfg.redacted_api_key(), "sk-****mnop");
        cfg.openai_api_key = "short".into();
        assert_eq!(cfg.redacted_api_key(), "****");
    }
}
