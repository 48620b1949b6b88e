//! Line-oriented chat loop for the terminal.
//!
//! Commands:
//!   /clear   reset the conversation to the system prompt
//!   /tools   list the tools the server currently exposes
//!   /history reprint the conversation so far
//!   /quit    leave (EOF works too)

use crate::agent::{Session, SupportAgent};
use crate::types::ChatRole;
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::error;

enum Command {
    Clear,
    Tools,
    History,
    Quit,
    Say(String),
    Nothing,
}

fn parse_line(line: &str) -> Command {
    match line.trim() {
        "" => Command::Nothing,
        "/clear" => Command::Clear,
        "/tools" => Command::Tools,
        "/history" => Command::History,
        "/quit" | "/exit" => Command::Quit,
        text => Command::Say(text.to_string()),
    }
}

/// Run the chat loop until `/quit` or end of input.
pub async fn run_repl<R: BufRead, W: Write>(
    agent: &SupportAgent,
    session: &mut Session,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    loop {
        write!(out, "{} ", "you>".cyan().bold())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        match parse_line(&line) {
            Command::Nothing => continue,
            Command::Quit => break,
            Command::Clear => {
                session.reset();
                writeln!(out, "{}", "Conversation cleared.".dimmed())?;
            }
            Command::History => {
                for msg in session.visible() {
                    let who = match msg.role {
                        ChatRole::User => "you>".cyan().bold(),
                        _ => "bot>".green().bold(),
                    };
                    writeln!(out, "{} {}", who, msg.content)?;
                }
            }
            Command::Tools => match agent.registry().list_tools().await {
                Ok(tools) if tools.is_empty() => {
                    writeln!(out, "{}", "The tool server lists no tools.".dimmed())?
                }
                Ok(tools) => {
                    for tool in tools {
                        writeln!(out, "  {} — {}", tool.name.bold(), tool.description)?;
                    }
                }
                Err(e) => writeln!(out, "{} {}", "Error:".red().bold(), e)?,
            },
            Command::Say(text) => match agent.process_turn(session, &text).await {
                Ok(reply) => writeln!(out, "{} {}\n", "bot>".green().bold(), reply)?,
                Err(e) => {
                    error!("Model call failed: {:#}", e);
                    writeln!(out, "{} {:#}\n", "Error:".red().bold(), e)?;
                }
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatModel;
    use crate::tools::orchestrator::tests::FakeRegistry;
    use crate::types::ChatMessage;
    use async_trait::async_trait;
    use std::io::Cursor;
    use std::sync::Arc;

    struct EchoModel;

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
            let last_user = messages
                .iter()
                .rev()
                .find(|m| m.role == ChatRole::User)
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(format!("echo: {}", last_user))
        }
    }

    fn agent() -> SupportAgent {
        SupportAgent::new(Arc::new(FakeRegistry::support_catalog()), Arc::new(EchoModel))
    }

    #[tokio::test]
    async fn chats_until_end_of_input() {
        let agent = agent();
        let mut session = Session::new("persona");
        let mut out = Vec::new();

        run_repl(&agent, &mut session, Cursor::new("hello\n\nthanks\n"), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("echo: hello"));
        assert!(text.contains("echo: thanks"));
        assert_eq!(session.len(), 5);
    }

    #[tokio::test]
    async fn clear_and_quit_commands() {
        let agent = agent();
        let mut session = Session::new("persona");
        let mut out = Vec::new();

        run_repl(
            &agent,
            &mut session,
            Cursor::new("hello\n/clear\n/quit\nnever read\n"),
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Conversation cleared."));
        assert!(!text.contains("never read"));
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn history_command_replays_visible_messages() {
        let agent = agent();
        let mut session = Session::new("secret persona");
        let mut out = Vec::new();

        run_repl(&agent, &mut session, Cursor::new("hi\n/history\n"), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("echo: hi").count(), 2);
        assert!(!text.contains("secret persona"));
    }

    #[tokio::test]
    async fn tools_command_lists_catalog() {
        let agent = agent();
        let mut session = Session::new("persona");
        let mut out = Vec::new();

        run_repl(&agent, &mut session, Cursor::new("/tools\n"), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("order_status"));
        assert!(text.contains("Warranty information"));
        assert_eq!(session.len(), 1);
    }
}
