//! # Intentbot Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates intentbot's configuration and
//! resolves which intent table the bot should answer from.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (replaces 2 and 3 when given)
//! 2. Project-specific `.intentbot.toml` in the current directory or an ancestor
//!    (the search stops at the first directory containing `.git`)
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/intentbot/config.toml` on Linux)
//! 4. Default values defined in the code
//!
//! Every file is read into a `FileConfig` whose fields are all optional, so a
//! project file only needs to mention what it overrides. Paths are `~`-expanded
//! and, when relative, resolved against the directory of the file that named
//! them. The merged result is turned into a `Config` and validated once.
//!
//! ## Examples
//!
//! ```toml
//! [chat]
//! bot_name = "Inan"
//! typing_delay_min_ms = 1000
//! typing_delay_max_ms = 2000
//! quick_replies = ["What services do you offer?", "How can I contact you?"]
//!
//! [intents]
//! file = "intents.toml"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! site_dir = "~/sites/inan/public"
//! enable_cors = true
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let table = config::load_intent_table(&cfg, None)?;
//! println!("{}", table.respond("hello"));
//! ```
//!
use crate::core::error::{IntentbotError, Result};
use crate::core::intent::IntentTable;
use crate::core::session::TypingDelay;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".intentbot.toml";

/// Fully resolved configuration used by the commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub chat: ChatConfig,
    /// Intent table file. `None` selects the built-in table.
    pub intents_file: Option<PathBuf>,
    pub server: ServerSettings,
}

/// Presentation settings for conversations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Name shown in front of bot replies.
    pub bot_name: String,
    /// Lower bound of the simulated typing delay.
    pub typing_delay_min_ms: u64,
    /// Upper bound of the simulated typing delay.
    pub typing_delay_max_ms: u64,
    /// Canned user messages offered as one-step shortcuts.
    pub quick_replies: Vec<String>,
}

impl ChatConfig {
    /// The typing delay described by the configured bounds.
    pub fn typing_delay(&self) -> TypingDelay {
        TypingDelay::new(
            Duration::from_millis(self.typing_delay_min_ms),
            Duration::from_millis(self.typing_delay_max_ms),
        )
    }
}

/// Settings for `intentbot srv` coming from configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    /// Static site served next to the API, if any.
    pub site_dir: Option<PathBuf>,
    pub enable_cors: bool,
}

/// One configuration file as written on disk.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    chat: ChatSection,
    #[serde(default)]
    intents: IntentsSection,
    #[serde(default)]
    server: ServerSection,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct ChatSection {
    bot_name: Option<String>,
    typing_delay_min_ms: Option<u64>,
    typing_delay_max_ms: Option<u64>,
    quick_replies: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct IntentsSection {
    file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct ServerSection {
    host: Option<IpAddr>,
    port: Option<u16>,
    site_dir: Option<PathBuf>,
    enable_cors: Option<bool>,
}

fn default_bot_name() -> String {
    "Inan".to_string()
}
fn default_quick_replies() -> Vec<String> {
    [
        "What services do you offer?",
        "What technologies do you use?",
        "How much does it cost?",
        "How can I contact you?",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
const DEFAULT_TYPING_DELAY_MIN_MS: u64 = 1000;
const DEFAULT_TYPING_DELAY_MAX_MS: u64 = 2000;
const DEFAULT_PORT: u16 = 8000;

impl Default for Config {
    fn default() -> Self {
        FileConfig::default().resolve()
    }
}

impl FileConfig {
    /// Field-wise merge; values in `self` win over `lower`.
    fn merge_over(self, lower: FileConfig) -> FileConfig {
        FileConfig {
            chat: ChatSection {
                bot_name: self.chat.bot_name.or(lower.chat.bot_name),
                typing_delay_min_ms: self
                    .chat
                    .typing_delay_min_ms
                    .or(lower.chat.typing_delay_min_ms),
                typing_delay_max_ms: self
                    .chat
                    .typing_delay_max_ms
                    .or(lower.chat.typing_delay_max_ms),
                quick_replies: self.chat.quick_replies.or(lower.chat.quick_replies),
            },
            intents: IntentsSection {
                file: self.intents.file.or(lower.intents.file),
            },
            server: ServerSection {
                host: self.server.host.or(lower.server.host),
                port: self.server.port.or(lower.server.port),
                site_dir: self.server.site_dir.or(lower.server.site_dir),
                enable_cors: self.server.enable_cors.or(lower.server.enable_cors),
            },
        }
    }

    /// Expands `~` and anchors relative paths at `base` (the file's directory).
    fn resolve_paths(&mut self, base: &Path) {
        let anchor = |path: &PathBuf| -> PathBuf {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
            if expanded.is_absolute() {
                expanded
            } else {
                base.join(expanded)
            }
        };
        if let Some(file) = self.intents.file.take() {
            self.intents.file = Some(anchor(&file));
            debug!("Resolved intent table path: {:?}", self.intents.file);
        }
        if let Some(dir) = self.server.site_dir.take() {
            self.server.site_dir = Some(anchor(&dir));
            debug!("Resolved site directory: {:?}", self.server.site_dir);
        }
    }

    fn resolve(self) -> Config {
        Config {
            chat: ChatConfig {
                bot_name: self.chat.bot_name.unwrap_or_else(default_bot_name),
                typing_delay_min_ms: self
                    .chat
                    .typing_delay_min_ms
                    .unwrap_or(DEFAULT_TYPING_DELAY_MIN_MS),
                typing_delay_max_ms: self
                    .chat
                    .typing_delay_max_ms
                    .unwrap_or(DEFAULT_TYPING_DELAY_MAX_MS),
                quick_replies: self
                    .chat
                    .quick_replies
                    .unwrap_or_else(default_quick_replies),
            },
            intents_file: self.intents.file,
            server: ServerSettings {
                host: self
                    .server
                    .host
                    .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
                port: self.server.port.unwrap_or(DEFAULT_PORT),
                site_dir: self.server.site_dir,
                enable_cors: self.server.enable_cors.unwrap_or(true),
            },
        }
    }
}

/// Loads the effective configuration.
///
/// With `explicit` set, only that file (over defaults) is used and it must exist.
/// Otherwise the user file and the nearest project file are merged.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let merged = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user = load_user_config()?.unwrap_or_default();
            match load_project_config()? {
                Some(project) => project.merge_over(user),
                None => user,
            }
        }
    };
    let config = merged.resolve();
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

/// Loads the intent table selected by `override_path`, then `config`, then the built-in one.
pub fn load_intent_table(config: &Config, override_path: Option<&Path>) -> Result<IntentTable> {
    match override_path.or(config.intents_file.as_deref()) {
        Some(path) => {
            info!("Loading intent table from: {}", path.display());
            IntentTable::from_path(path)
        }
        None => {
            debug!("No intent table configured, using the built-in table.");
            IntentTable::builtin()
        }
    }
}

fn load_user_config() -> Result<Option<FileConfig>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Intentbot", "intentbot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<FileConfig>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
            Ok(None)
        }
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let mut file: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    file.resolve_paths(base);
    Ok(file)
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    let chat = &config.chat;
    if chat.bot_name.trim().is_empty() {
        return Err(anyhow!(IntentbotError::Config(
            "chat.bot_name cannot be empty.".to_string()
        )));
    }
    if chat.typing_delay_min_ms > chat.typing_delay_max_ms {
        return Err(anyhow!(IntentbotError::Config(format!(
            "chat.typing_delay_min_ms ({}) is greater than chat.typing_delay_max_ms ({}).",
            chat.typing_delay_min_ms, chat.typing_delay_max_ms
        ))));
    }
    if let Some(index) = chat.quick_replies.iter().position(|r| r.trim().is_empty()) {
        return Err(anyhow!(IntentbotError::Config(format!(
            "chat.quick_replies[{}] is empty.",
            index
        ))));
    }
    if let Some(dir) = &config.server.site_dir {
        if !dir.is_dir() {
            return Err(anyhow!(IntentbotError::Config(format!(
                "server.site_dir '{}' is not a directory.",
                dir.display()
            ))));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}
