//! Supportbot — customer-support chat assistant.
//!
//! Usage:
//!   supportbot chat            Interactive chat session
//!   supportbot ask <TEXT>      Answer a single question
//!   supportbot tools           List tools exposed by the MCP server
//!   supportbot config          Show the effective configuration
//!   supportbot init            Write a default config file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use supportbot::agent::repl::run_repl;
use supportbot::agent::system_prompt::resolve_system_prompt;
use supportbot::agent::{Session, SupportAgent};
use supportbot::config::{self, SupportConfig};
use supportbot::llm::InferenceClient;
use supportbot::mcp::McpClient;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "supportbot")]
#[command(version)]
#[command(about = "Customer-support chat assistant backed by an MCP tool server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the supportbot home directory (default: ~/.supportbot).
    #[arg(long)]
    home: Option<String>,

    /// Log level (debug, info, warn, error). Overrides the config file.
    #[arg(long)]
    log_level: Option<String>,

    /// MCP server URL. Overrides config and MCP_SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat session.
    Chat,

    /// Answer a single question and exit.
    Ask {
        /// The question to ask.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List the tools exposed by the MCP server.
    Tools,

    /// Show the effective configuration.
    Config,

    /// Write a default config file if none exists.
    Init,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let home_dir = cli
        .home
        .as_deref()
        .map(config::resolve_home)
        .unwrap_or_else(config::default_home_dir);

    let mut cfg = config::resolve_config(&home_dir)?;
    if let Some(url) = cli.server_url {
        cfg.mcp_server_url = url;
    }

    // Initialize logging (stderr, so the transcript on stdout stays clean)
    let level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chat => cmd_chat(&cfg).await,
        Commands::Ask { text } => cmd_ask(&cfg, &text.join(" ")).await,
        Commands::Tools => cmd_tools(&cfg).await,
        Commands::Config => cmd_config(&cfg, &home_dir),
        Commands::Init => cmd_init(&home_dir),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

async fn cmd_chat(cfg: &SupportConfig) -> Result<()> {
    let agent = build_agent(cfg)?;
    let mut session = Session::new(resolve_system_prompt(&cfg.system_prompt));

    println!("{}", "=== Computer Products Support ===".bold());
    println!(
        "  Model: {}  |  Tools: {}",
        cfg.model,
        cfg.mcp_server_url.dimmed()
    );
    println!(
        "  {}\n",
        "Describe your issue or question. /clear resets, /tools lists tools, /quit exits.".dimmed()
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_repl(&agent, &mut session, stdin.lock(), &mut stdout).await
}

async fn cmd_ask(cfg: &SupportConfig, question: &str) -> Result<()> {
    let agent = build_agent(cfg)?;
    let mut session = Session::new(resolve_system_prompt(&cfg.system_prompt));

    let reply = agent
        .process_turn(&mut session, question)
        .await
        .context("Failed to get an answer from the model")?;

    println!("{}", reply);
    Ok(())
}

async fn cmd_tools(cfg: &SupportConfig) -> Result<()> {
    let client = McpClient::new(&cfg.mcp_server_url, cfg.mcp_timeout());
    let tools = client
        .list_tools()
        .await
        .with_context(|| format!("Failed to list tools from {}", client.url()))?;

    if tools.is_empty() {
        println!("{}", "The tool server lists no tools.".dimmed());
        return Ok(());
    }

    println!("Available tools ({}):", tools.len());
    for tool in &tools {
        println!("  {} — {}", tool.name.bold(), tool.description);
    }
    Ok(())
}

fn cmd_config(cfg: &SupportConfig, home_dir: &Path) -> Result<()> {
    println!();
    println!("{}", "=== Supportbot Configuration ===".bold());
    println!();
    println!(
        "  {}:  {}",
        "Config file".bold(),
        home_dir.join(config::CONFIG_FILE).display()
    );
    println!("  {}:", "Tool server".bold());
    println!("    URL:      {}", cfg.mcp_server_url);
    println!("    Timeout:  {}s per attempt", cfg.mcp_timeout_secs);
    println!("  {}:", "Model".bold());
    println!("    API:      {}", cfg.openai_api_url);
    println!("    Key:      {}", cfg.redacted_api_key());
    println!("    Model:    {}", cfg.model);
    println!("    Temp:     {}", cfg.temperature);
    println!();
    Ok(())
}

fn cmd_init(home_dir: &Path) -> Result<()> {
    let path = home_dir.join(config::CONFIG_FILE);
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    config::save_config(&SupportConfig::default(), &path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    println!("{} Written: {}", ">>>".green().bold(), path.display());
    println!("Set OPENAI_API_KEY (and optionally MCP_SERVER_URL) in your environment or .env.");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_agent(cfg: &SupportConfig) -> Result<SupportAgent> {
    let registry = McpClient::new(&cfg.mcp_server_url, cfg.mcp_timeout());
    let model = InferenceClient::new(&cfg.openai_api_url, &cfg.openai_api_key)?
        .with_model(&cfg.model)
        .with_temperature(cfg.temperature);

    info!(
        "Using model {} with tool server {}",
        model.model(),
        registry.url()
    );

    Ok(SupportAgent::new(Arc::new(registry), Arc::new(model)))
}
