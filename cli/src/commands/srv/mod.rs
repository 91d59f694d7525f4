//! # Intentbot HTTP Chat Endpoint
//!
//! File: cli/src/commands/srv/mod.rs
//!
//! ## Overview
//!
//! This module serves the bot over HTTP so the website's chat widget can ask
//! it for replies instead of carrying its own keyword table. It can also serve
//! the site itself from a local directory, which is handy during development.
//!
//! ## Architecture
//!
//! - `config.rs`: command-line arguments merged with the `[server]` config section
//! - `api.rs`: JSON routes (`/api/chat`, `/api/quick-replies`, `/api/health`)
//! - `server_logic.rs`: router assembly, port selection, graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! # API only, on the default 127.0.0.1:8000
//! intentbot srv
//!
//! # API plus the static site, reachable from the LAN
//! intentbot srv --host 0.0.0.0 --port 9000 --site ./public
//!
//! # Ask for a reply
//! curl -s localhost:8000/api/chat -H 'content-type: application/json' \
//!      -d '{"message":"How much does it cost?"}'
//! ```
//!
use super::GlobalArgs;
use crate::core::error::Result;
use std::sync::Arc;
use tracing::info;

pub use config::SrvArgs;

/// Merges command-line arguments with configuration file settings.
pub mod config;

/// JSON API handlers and shared state.
pub mod api;

/// Contains the core Axum-based HTTP server implementation.
pub mod server_logic;

/// # Handle Server Command (`handle_srv`)
///
/// Loads configuration and the intent table, resolves the effective server
/// settings, and runs the server until Ctrl+C or SIGTERM.
///
/// ## Errors
///
/// Fails if the configuration or intent table is invalid, the site directory
/// does not exist, or no port can be bound.
pub async fn handle_srv(args: SrvArgs, global: &GlobalArgs) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let (app_config, table) = super::load_config_and_table(global)?;
    let server_config = config::merge_server_config(args, &app_config.server)?;
    info!("Effective server config: {:?}", server_config);

    let state = api::AppState::new(Arc::new(table), app_config.chat);
    server_logic::run_server(server_config, state).await
}
