//! # Intentbot Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! ## Overview
//!
//! `intentbot ask` answers a single message and exits. It is the quickest way
//! to see which intent a phrase lands on while editing a table, and a simple
//! building block for scripts.
//!
//! ## Examples
//!
//! ```bash
//! # Plain reply (line breaks preserved)
//! intentbot ask "What services do you offer?"
//!
//! # Show which intent answered
//! intentbot ask --show-intent how much does it cost
//!
//! # Machine-readable output
//! intentbot ask --json "get in touch"
//! # {"intent":"contact","response":"I'd love to connect you..."}
//! ```
//!
use super::GlobalArgs;
use crate::core::error::Result;
use crate::core::intent::{self, IntentTable};
use clap::Parser;
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

/// # Ask Command Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The message to answer. Several words are joined with single spaces.
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub message: Vec<String>,

    /// Print the matched intent key on its own line before the reply.
    #[arg(long)]
    pub show_intent: bool,

    /// Print `{"intent": ..., "response": ...}` as JSON.
    #[arg(long, conflicts_with = "show_intent")]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct AskOutput<'a> {
    intent: &'a str,
    response: &'a str,
}

/// # Handle Ask Command (`handle_ask`)
///
/// Loads the configured intent table and prints the reply for the message.
///
/// ## Errors
///
/// Fails when the configuration or the intent table cannot be loaded, or
/// when stdout cannot be written.
pub async fn handle_ask(args: AskArgs, global: &GlobalArgs) -> Result<()> {
    let (_, table) = super::load_config_and_table(global)?;
    let message = args.message.join(" ");
    debug!("Answering message: {:?}", message);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_answer(&mut out, &table, &message, &args)?;
    out.flush()?;
    Ok(())
}

fn write_answer<W: Write>(
    out: &mut W,
    table: &IntentTable,
    message: &str,
    args: &AskArgs,
) -> Result<()> {
    if args.json {
        let answer = table.match_intent(message);
        let output = AskOutput {
            intent: answer.key,
            response: answer.response,
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    } else if args.show_intent {
        let answer = table.match_intent(message);
        writeln!(out, "[{}]", answer.key)?;
        writeln!(out, "{}", answer.response)?;
    } else {
        writeln!(out, "{}", intent::respond(message, table))?;
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> IntentTable {
        IntentTable::from_toml_str(
            r#"
            [[intents]]
            key = "contact"
            keywords = ["contact"]
            response = "Email us.\nOr call."

            [[intents]]
            key = "default"
            response = "Pardon?"
            "#,
        )
        .unwrap()
    }

    fn args(flags: &[&str]) -> AskArgs {
        let mut argv = vec!["ask"];
        argv.extend_from_slice(flags);
        AskArgs::parse_from(argv)
    }

    fn render(flags: &[&str]) -> String {
        let args = args(flags);
        let message = args.message.join(" ");
        let mut out = Vec::new();
        write_answer(&mut out, &table(), &message, &args).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_words_are_joined() {
        let args = args(&["how", "to", "CONTACT", "you"]);
        assert_eq!(args.message.join(" "), "how to CONTACT you");
    }

    #[test]
    fn test_plain_output_keeps_line_breaks() {
        assert_eq!(render(&["contact"]), "Email us.\nOr call.\n");
    }

    #[test]
    fn test_show_intent() {
        assert_eq!(render(&["--show-intent", "hmm"]), "[default]\nPardon?\n");
    }

    #[test]
    fn test_json_output() {
        let output = render(&["--json", "contact", "me"]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["intent"], "contact");
        assert_eq!(value["response"], "Email us.\nOr call.");
    }

    #[test]
    fn test_json_conflicts_with_show_intent() {
        let result = AskArgs::try_parse_from(["ask", "--json", "--show-intent", "hi"]);
        assert!(result.is_err());
    }
}
