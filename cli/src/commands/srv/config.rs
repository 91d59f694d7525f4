//! # Intentbot Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//!
//! ## Overview
//!
//! Resolves the settings `intentbot srv` runs with. Sources, highest first:
//! 1. Command-line flags
//! 2. The `[server]` section of the loaded configuration
//! 3. Built-in defaults (127.0.0.1:8000, CORS on, no static site)
//!
//! Flags are optional rather than defaulted, so "not given" is never confused
//! with "given the default value".
//!
use crate::core::config::ServerSettings;
use crate::core::error::{IntentbotError, Result};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::debug;

/// # Server Command Arguments (`SrvArgs`)
#[derive(Parser, Debug, Default)]
pub struct SrvArgs {
    /// Port to listen on. If it is taken, the next free port is used.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Address to bind. `0.0.0.0` accepts connections from other machines.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Directory with the website to serve next to the API.
    #[arg(long, value_name = "DIR")]
    pub site: Option<PathBuf>,

    /// Do not send CORS headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// # Effective Server Configuration (`ServerConfig`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Absolute path of the static site, if one is served.
    pub site_dir: Option<PathBuf>,
    pub enable_cors: bool,
}

/// Applies `args` over `settings` and resolves the site directory.
///
/// ## Errors
///
/// Fails when the site directory does not exist or is not a directory.
pub fn merge_server_config(args: SrvArgs, settings: &ServerSettings) -> Result<ServerConfig> {
    let site_dir = match args.site.or_else(|| settings.site_dir.clone()) {
        Some(dir) => {
            let resolved = dir
                .canonicalize()
                .with_context(|| format!("Failed to resolve site directory '{}'", dir.display()))?;
            if !resolved.is_dir() {
                return Err(anyhow!(IntentbotError::Config(format!(
                    "Site path '{}' is not a directory.",
                    resolved.display()
                ))));
            }
            debug!("Serving static site from {}", resolved.display());
            Some(resolved)
        }
        None => None,
    };

    Ok(ServerConfig {
        host: args.host.unwrap_or(settings.host),
        port: args.port.unwrap_or(settings.port),
        site_dir,
        enable_cors: settings.enable_cors && !args.no_cors,
    })
}
