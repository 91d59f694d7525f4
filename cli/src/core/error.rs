//! # Intentbot Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout intentbot. There are
//! two layers:
//! - `IntentbotError`: a `thiserror` enum for the failures callers may want to
//!   match on (configuration problems, invalid intent tables).
//! - `Result<T>`: an alias for `anyhow::Result<T>` used by command handlers,
//!   which attach context with `.context(...)` as errors bubble up to `main`.
//!
//! An intent table is validated exactly once, when it is built. Every failure
//! found there surfaces as `IntentbotError::InvalidConfiguration` carrying a
//! `TableIssue` that names the offending entry. Once a table exists, answering
//! a message cannot fail.
//!
//! ## Examples
//!
//! ```rust
//! match IntentTable::new(entries) {
//!     Ok(table) => run_chat(table),
//!     Err(IntentbotError::InvalidConfiguration(TableIssue::MissingDefault)) => {
//!         eprintln!("Add a [[intents]] entry with key = \"default\".");
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the intentbot application.
#[derive(Error, Debug)]
pub enum IntentbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid intent table: {0}")]
    InvalidConfiguration(#[from] TableIssue),

    #[error("Failed to parse intent table: {source}")]
    TableParse {
        #[from]
        source: toml::de::Error,
    },
}

/// The specific rule an intent table broke during construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableIssue {
    #[error("no \"default\" entry; one is required as the fallback response")]
    MissingDefault,

    #[error("the \"default\" entry must not have keywords (found {count})")]
    DefaultHasKeywords { count: usize },

    #[error("intent key '{key}' appears more than once")]
    DuplicateKey { key: String },

    #[error("entry #{position} has an empty key")]
    BlankKey { position: usize },

    #[error("intent '{key}' has an empty keyword at index {index}")]
    BlankKeyword { key: String, index: usize },

    #[error("intent '{key}' has an empty response")]
    BlankResponse { key: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
