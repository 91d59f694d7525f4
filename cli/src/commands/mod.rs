//! # Intentbot Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the intentbot CLI and the
//! options they share.
//!
//! ## Commands
//!
//! - `ask`: Answer a single message and exit
//! - `chat`: Interactive conversation in the terminal
//! - `check`: Validate an intent table and summarize it
//! - `srv`: HTTP chat endpoint for the website widget
//!
//! Each command defines its own arguments structure and handler function.
//! Handlers receive the shared `GlobalArgs` so they can resolve configuration
//! and the intent table the same way.
//!
use crate::core::config::{self, Config};
use crate::core::error::Result;
use crate::core::intent::IntentTable;
use clap::Args;
use std::path::PathBuf;

/// Command for answering one message.
pub mod ask;
/// Command for the interactive terminal chat.
pub mod chat;
/// Command for validating intent tables.
pub mod check;
/// Command group for the HTTP chat endpoint. Includes configuration, routes and server logic.
pub mod srv;

/// Options accepted by every command.
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Use this configuration file instead of the user and project ones.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Answer from this intent table instead of the configured one.
    #[arg(long, global = true, value_name = "FILE", env = "INTENTBOT_INTENTS")]
    pub intents: Option<PathBuf>,
}

/// Loads the configuration and the intent table selected by `global`.
///
/// A table that fails validation stops the command here, before any
/// message is answered.
pub fn load_config_and_table(global: &GlobalArgs) -> Result<(Config, IntentTable)> {
    let config = config::load_config(global.config.as_deref())?;
    let table = config::load_intent_table(&config, global.intents.as_deref())?;
    Ok((config, table))
}
