pub mod schema;

pub use schema::{SupportConfig, DEFAULT_MCP_URL};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name inside the home directory.
pub const CONFIG_FILE: &str = "supportbot.toml";

/// Default supportbot home directory (~/.supportbot).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".supportbot"))
        .unwrap_or_else(|| PathBuf::from(".supportbot"))
}

/// Expand `~` in a user-supplied home path.
pub fn resolve_home(home: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(home).into_owned())
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<SupportConfig> {
    if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read supportbot config file")?;
        let config: SupportConfig =
            toml::from_str(&contents).context("Failed to parse supportbot config (TOML)")?;
        Ok(config)
    } else {
        debug!("No config at {}, using defaults", path.display());
        Ok(SupportConfig::default())
    }
}

/// Save config to the given path (TOML format).
pub fn save_config(config: &SupportConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents).context("Failed to write config file")?;
    Ok(())
}

/// Resolve the effective config: `.env` file, then the TOML file, then
/// process environment overrides.
pub fn resolve_config(home_dir: &Path) -> Result<SupportConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    let mut config = load_config(&home_dir.join(CONFIG_FILE))?;
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(cfg, SupportConfig::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let cfg = SupportConfig {
            mcp_server_url: "http://localhost:9000/mcp".into(),
            mcp_timeout_secs: 5,
            system_prompt: "Be terse.".into(),
            ..SupportConfig::default()
        };

        save_config(&cfg, &path).unwrap();

        assert_eq!(load_config(&path).unwrap(), cfg);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "model = \"gpt-4o\"\n").unwrap();

        let cfg = load_config(&path).unwrap();

        assert_eq!(cfg.model, "gpt-4o");
        assert_eq!(cfg.mcp_server_url, DEFAULT_MCP_URL);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "model = [").unwrap();

        assert!(load_config(&path).is_err());
    }
}
