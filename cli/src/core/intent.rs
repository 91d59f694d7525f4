//! # Intentbot Intent Responder
//!
//! File: cli/src/core/intent.rs
//!
//! ## Overview
//!
//! This module holds the piece of intentbot that decides what the bot says:
//! an ordered, validated table of intents and the keyword matcher that walks it.
//!
//! - `IntentEntry`: one intent, i.e. a unique key, its trigger keywords and the canned reply.
//! - `IntentTable`: the ordered list of entries. It can only be obtained through
//!   `IntentTable::new` (or the loaders built on it), which enforces every table
//!   rule up front, including the presence of the `"default"` fallback entry.
//! - `respond`: maps a user message to exactly one reply.
//!
//! ## Matching Rules
//!
//! 1. The message is trimmed and lowercased. Keywords were lowercased when the table was built.
//! 2. Entries are visited in table order, skipping `"default"`.
//! 3. Within an entry, keywords are visited in order. A keyword matches when it
//!    occurs anywhere in the message as a plain substring (`"hi"` matches `"this"`).
//! 4. The first matching keyword of the first matching entry wins. A later entry
//!    never beats an earlier one, however specific its keyword.
//! 5. When nothing matches, the `"default"` response is returned.
//!
//! Matching reads nothing but its two inputs, so the same message against the same
//! table always produces the same reply.
//!
//! ## Table Files
//!
//! Tables are written in TOML as an array of tables; file order is table order:
//!
//! ```toml
//! [[intents]]
//! key = "pricing"
//! keywords = ["price", "pricing", "cost"]
//! response = "Our pricing is customized to your project."
//!
//! [[intents]]
//! key = "default"
//! response = "Could you rephrase your question?"
//! ```
//!
use crate::core::error::{IntentbotError, Result, TableIssue};
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Key of the reserved fallback entry.
pub const DEFAULT_KEY: &str = "default";

/// The table shipped with the binary, used when no table file is configured.
const BUILTIN_TABLE: &str = include_str!("../../assets/intents.toml");

/// A single intent: a key, the keywords that trigger it and the reply it produces.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct IntentEntry {
    /// Unique name of the intent (e.g. `"pricing"`). `"default"` is reserved.
    pub key: String,
    /// Substrings that trigger this intent, tried in order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Reply text. Line breaks (`\n`) are part of the reply.
    pub response: String,
}

/// On-disk shape of a table file.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TableFile {
    #[serde(default)]
    intents: Vec<IntentEntry>,
}

/// An ordered, validated, immutable set of intents.
///
/// Holding an `IntentTable` proves the table has a `"default"` entry, so
/// `respond` always has something to return.
#[derive(Debug, Clone)]
pub struct IntentTable {
    entries: Vec<IntentEntry>,
    default_index: usize,
}

/// The outcome of matching one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentMatch<'t> {
    /// Key of the intent that answered.
    pub key: &'t str,
    /// The keyword that triggered it, `None` when the default entry answered.
    pub keyword: Option<&'t str>,
    /// The reply text.
    pub response: &'t str,
}

impl IntentTable {
    /// Validates `entries` and builds a table from them, keeping their order.
    ///
    /// Keywords are lowercased here so matching only has to normalize the message.
    ///
    /// ## Errors
    ///
    /// Returns `IntentbotError::InvalidConfiguration` when:
    /// - a key is blank or used twice,
    /// - a keyword or a response is blank,
    /// - the `"default"` entry has keywords,
    /// - there is no `"default"` entry at all.
    pub fn new(entries: Vec<IntentEntry>) -> std::result::Result<Self, IntentbotError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());
        let mut default_index = None;

        for (position, entry) in entries.iter().enumerate() {
            if entry.key.trim().is_empty() {
                return Err(TableIssue::BlankKey { position }.into());
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(TableIssue::DuplicateKey {
                    key: entry.key.clone(),
                }
                .into());
            }
            if entry.response.trim().is_empty() {
                return Err(TableIssue::BlankResponse {
                    key: entry.key.clone(),
                }
                .into());
            }
            if entry.key == DEFAULT_KEY {
                if !entry.keywords.is_empty() {
                    return Err(TableIssue::DefaultHasKeywords {
                        count: entry.keywords.len(),
                    }
                    .into());
                }
                default_index = Some(position);
                continue;
            }
            if let Some(index) = entry.keywords.iter().position(|k| k.trim().is_empty()) {
                return Err(TableIssue::BlankKeyword {
                    key: entry.key.clone(),
                    index,
                }
                .into());
            }
        }

        let default_index = default_index.ok_or(TableIssue::MissingDefault)?;

        let entries = entries
            .into_iter()
            .map(|entry| IntentEntry {
                keywords: entry.keywords.iter().map(|k| k.to_lowercase()).collect(),
                ..entry
            })
            .collect::<Vec<_>>();

        debug!(
            "Built intent table with {} entries ({} keywords)",
            entries.len(),
            entries.iter().map(|e| e.keywords.len()).sum::<usize>()
        );

        Ok(Self {
            entries,
            default_index,
        })
    }

    /// Parses a TOML table document and validates it.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, IntentbotError> {
        let file: TableFile = toml::from_str(content)?;
        Self::new(file.intents)
    }

    /// Reads, parses and validates a table file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read intent table: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load intent table from {}", path.display()))
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_TABLE).context("Built-in intent table is invalid")
    }

    /// Entries in table order, with lowercased keywords.
    pub fn entries(&self) -> &[IntentEntry] {
        &self.entries
    }

    /// The fallback reply.
    pub fn default_response(&self) -> &str {
        &self.entries[self.default_index].response
    }

    /// Finds the intent answering `message`. See the module docs for the rules.
    pub fn match_intent(&self, message: &str) -> IntentMatch<'_> {
        let normalized = message.trim().to_lowercase();

        if !normalized.is_empty() {
            for entry in self.entries.iter().filter(|e| e.key != DEFAULT_KEY) {
                if let Some(keyword) = entry
                    .keywords
                    .iter()
                    .find(|k| normalized.contains(k.as_str()))
                {
                    trace!("Keyword '{}' matched intent '{}'", keyword, entry.key);
                    return IntentMatch {
                        key: &entry.key,
                        keyword: Some(keyword.as_str()),
                        response: &entry.response,
                    };
                }
            }
        }

        trace!("No keyword matched, falling back to '{}'", DEFAULT_KEY);
        IntentMatch {
            key: DEFAULT_KEY,
            keyword: None,
            response: self.default_response(),
        }
    }

    /// The reply for `message`.
    pub fn respond(&self, message: &str) -> &str {
        self.match_intent(message).response
    }
}

/// Answers `message` from `table`.
pub fn respond<'t>(message: &str, table: &'t IntentTable) -> &'t str {
    table.respond(message)
}
