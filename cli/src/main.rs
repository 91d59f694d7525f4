//! # Intentbot Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the intentbot CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - `core`: the intent table and responder, chat sessions, configuration, errors
//! - `commands`: one module per top-level command (`ask`, `chat`, `check`, `srv`)
//!
//! All errors are propagated up to `main`, which prints them with their
//! context chain and exits with status 1.
//!
//! ## Examples
//!
//! ```bash
//! # One reply
//! intentbot ask "What services do you offer?"
//!
//! # Talk to the bot, with debug logs on stderr
//! intentbot -vv chat
//!
//! # Validate a custom table
//! intentbot check ./intents.toml
//!
//! # Serve the chat API for the website
//! intentbot srv --site ./public
//! ```
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // One module per top-level command.
mod core; // Responder, sessions, configuration and errors.

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "intentbot",
    about = "💬 intentbot: keyword-matching canned-reply chatbot",
    long_about = "Answers visitor questions from an ordered table of intents.\n\
                  The first intent with a keyword contained in the message wins;\n\
                  the \"default\" intent answers everything else.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: commands::GlobalArgs,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single message.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Chat with the bot in the terminal.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Validate an intent table and summarize it.
    Check(commands::check::CheckArgs),
    /// Serve the chat API (and optionally the website) over HTTP.
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let global = &cli.global;
    let command_result = match cli.command {
        Commands::Ask(args) => commands::ask::handle_ask(args, global).await,
        Commands::Chat(args) => commands::chat::handle_chat(args, global).await,
        Commands::Check(args) => commands::check::handle_check(args, global).await,
        Commands::Srv(args) => commands::srv::handle_srv(args, global).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
