//! # Intentbot Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! `intentbot chat` opens a REPL-style conversation with the bot in the
//! terminal. It mirrors the website widget: the bot pauses for a moment (the
//! configured typing delay) before each reply, quick replies can be sent with
//! a single command, and multi-line replies keep their line breaks.
//!
//! ## Commands inside the chat
//!
//! - `/replies`: list the quick replies
//! - `/1`, `/2`, ...: send quick reply number N
//! - `/history`: print the conversation so far
//! - `/help`: show this list
//! - `/quit` or `/exit` (or end of input): leave
//!
//! Anything else is sent to the bot as a message. Blank lines are ignored.
//!
//! ## Examples
//!
//! ```bash
//! intentbot chat
//! intentbot chat --instant          # no typing delay
//! echo "pricing?" | intentbot chat  # scripted
//! ```
//!
use super::GlobalArgs;
use crate::core::config::ChatConfig;
use crate::core::error::Result;
use crate::core::session::{ChatSession, Sender, TypingDelay};
use anyhow::Context;
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// # Chat Command Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Reply immediately instead of simulating typing.
    #[arg(long)]
    pub instant: bool,
}

/// What a line typed at the prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Empty,
    Quit,
    Help,
    Replies,
    History,
    Message(String),
    Invalid(String),
}

/// # Handle Chat Command (`handle_chat`)
///
/// Builds a `ChatSession` from the configured table and typing delay and
/// runs the REPL on stdin/stdout until the user quits or input ends.
pub async fn handle_chat(args: ChatArgs, global: &GlobalArgs) -> Result<()> {
    let (config, table) = super::load_config_and_table(global)?;
    let delay = if args.instant {
        TypingDelay::none()
    } else {
        config.chat.typing_delay()
    };
    debug!(
        "Typing delay between {:?} and {:?}",
        delay.min(),
        delay.max()
    );
    info!(
        "Starting chat with {} intents",
        table.entries().len()
    );

    let session = ChatSession::new(Arc::new(table), delay);
    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    let show_typing = stdout.is_terminal();
    run_repl(session, &config.chat, input, &mut stdout, show_typing).await
}

async fn run_repl<R, W>(
    mut session: ChatSession,
    chat: &ChatConfig,
    input: R,
    out: &mut W,
    show_typing: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let name = chat.bot_name.as_str();
    writeln!(
        out,
        "Chat with {}! Type /help for commands, /quit to leave.",
        name
    )?;
    write_quick_replies(out, &chat.quick_replies)?;

    let mut lines = input.lines();
    loop {
        write!(out, "You: ")?;
        out.flush()?;

        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read chat input")?
        else {
            writeln!(out)?;
            break;
        };

        let message = match parse_input(&line, &chat.quick_replies) {
            Input::Empty => continue,
            Input::Quit => {
                writeln!(out, "{}: Goodbye!", name)?;
                break;
            }
            Input::Help => {
                write_help(out)?;
                continue;
            }
            Input::Replies => {
                write_quick_replies(out, &chat.quick_replies)?;
                continue;
            }
            Input::History => {
                for message in session.transcript() {
                    let speaker = match message.sender {
                        Sender::User => "You",
                        Sender::Bot => name,
                    };
                    writeln!(out, "{}", render_message(speaker, &message.text))?;
                }
                continue;
            }
            Input::Invalid(reason) => {
                writeln!(out, "{}", reason)?;
                continue;
            }
            Input::Message(text) => text,
        };

        if line.trim_start().starts_with('/') {
            writeln!(out, "You: {}", message)?;
        }
        if show_typing {
            write!(out, "{} is typing...", name)?;
            out.flush()?;
        }
        let reply = session.send(&message).await.map(|m| m.text.clone());
        if show_typing {
            write!(out, "\r\x1b[2K")?;
        }
        if let Some(reply) = reply {
            writeln!(out, "{}", render_message(name, &reply))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn parse_input(line: &str, quick_replies: &[String]) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Message(trimmed.to_string());
    };
    match command.to_ascii_lowercase().as_str() {
        "quit" | "exit" => Input::Quit,
        "help" => Input::Help,
        "replies" => Input::Replies,
        "history" => Input::History,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 && n <= quick_replies.len() => {
                Input::Message(quick_replies[n - 1].clone())
            }
            Ok(n) => Input::Invalid(format!(
                "There is no quick reply #{} (try /replies).",
                n
            )),
            Err(_) => Input::Invalid(format!(
                "Unknown command '/{}' (try /help).",
                command
            )),
        },
    }
}

/// Prefixes the first line with `speaker: ` and indents the rest under it.
///
/// Blank lines inside the text stay blank.
fn render_message(speaker: &str, text: &str) -> String {
    let indent = " ".repeat(speaker.chars().count() + 2);
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{}: {}", speaker, line)
            } else if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_quick_replies<W: Write>(out: &mut W, quick_replies: &[String]) -> io::Result<()> {
    if quick_replies.is_empty() {
        return Ok(());
    }
    writeln!(out, "Quick replies:")?;
    for (i, reply) in quick_replies.iter().enumerate() {
        writeln!(out, "  /{}  {}", i + 1, reply)?;
    }
    Ok(())
}

fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  /replies   list quick replies")?;
    writeln!(out, "  /N         send quick reply number N")?;
    writeln!(out, "  /history   show the conversation so far")?;
    writeln!(out, "  /quit      leave the chat")?;
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::intent::IntentTable;

    fn chat_config() -> ChatConfig {
        ChatConfig {
            bot_name: "Inan".to_string(),
            typing_delay_min_ms: 0,
            typing_delay_max_ms: 0,
            quick_replies: vec!["How much does it cost?".to_string()],
        }
    }

    fn session() -> ChatSession {
        let table = IntentTable::from_toml_str(
            r#"
            [[intents]]
            key = "pricing"
            keywords = ["cost", "price"]
            response = "It depends.\n\nAsk for a quote."

            [[intents]]
            key = "default"
            response = "Could you rephrase?"
            "#,
        )
        .unwrap();
        ChatSession::new(Arc::new(table), TypingDelay::none())
    }

    async fn run(script: &str) -> String {
        let mut out = Vec::new();
        run_repl(
            session(),
            &chat_config(),
            BufReader::new(script.as_bytes()),
            &mut out,
            false,
        )
        .await
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_input() {
        let replies = vec!["First".to_string(), "Second".to_string()];
        assert_eq!(parse_input("   ", &replies), Input::Empty);
        assert_eq!(parse_input("/QUIT", &replies), Input::Quit);
        assert_eq!(parse_input("/exit", &replies), Input::Quit);
        assert_eq!(parse_input("/help", &replies), Input::Help);
        assert_eq!(parse_input("/replies", &replies), Input::Replies);
        assert_eq!(parse_input("/history", &replies), Input::History);
        assert_eq!(
            parse_input("/2", &replies),
            Input::Message("Second".to_string())
        );
        assert!(matches!(parse_input("/3", &replies), Input::Invalid(_)));
        assert!(matches!(parse_input("/0", &replies), Input::Invalid(_)));
        assert!(matches!(parse_input("/dance", &replies), Input::Invalid(_)));
        assert_eq!(
            parse_input("  price? ", &replies),
            Input::Message("price?".to_string())
        );
    }

    #[test]
    fn test_render_message_indents_continuation_lines() {
        assert_eq!(
            render_message("Inan", "Line one\n\n• item\n• item"),
            "Inan: Line one\n\n      • item\n      • item"
        );
        assert_eq!(render_message("You", "single"), "You: single");
    }

    #[tokio::test]
    async fn test_repl_answers_and_quits() {
        let output = run("what's the price?\n/quit\nnever read\n").await;
        assert!(output.starts_with("Chat with Inan!"));
        assert!(output.contains("/1  How much does it cost?"));
        assert!(output.contains("Inan: It depends.\n\n      Ask for a quote."));
        assert!(output.contains("Inan: Goodbye!"));
        assert!(!output.contains("never read"));
    }

    #[tokio::test]
    async fn test_repl_quick_reply_and_history() {
        let output = run("/1\n/history\n").await;
        assert!(output.contains("You: How much does it cost?"));
        let history_start = output.rfind("You: How much does it cost?").unwrap();
        assert!(output[history_start..].contains("Inan: It depends."));
    }

    #[tokio::test]
    async fn test_repl_blank_lines_and_eof() {
        let output = run("\n   \nxyzzy plugh").await;
        assert!(output.contains("Inan: Could you rephrase?"));
        assert_eq!(output.matches("Inan: ").count(), 1);
        assert!(output.ends_with("You: \n"));
    }

    #[tokio::test]
    async fn test_repl_reports_bad_commands() {
        let output = run("/9\n/dance\n").await;
        assert!(output.contains("There is no quick reply #9"));
        assert!(output.contains("Unknown command '/dance'"));
    }
}
