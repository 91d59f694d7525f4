//! # Intentbot CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! is compiled as its own crate and runs the real `intentbot` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// # Get Intentbot Command (`intentbot_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `intentbot` binary,
/// isolated from the developer's own configuration: it runs in `dir`, with
/// `HOME` and `XDG_CONFIG_HOME` pointing there and `INTENTBOT_INTENTS` unset.
///
/// ## Panics
/// Panics if the `intentbot` binary cannot be found via `Command::cargo_bin`.
pub fn intentbot_cmd(dir: &Path) -> Command {
    let mut cmd =
        Command::cargo_bin("intentbot").expect("Failed to find intentbot binary for testing");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("INTENTBOT_INTENTS")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `content` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test fixture");
    path
}

/// A small valid table where "contact" is listed before "services".
pub const SMALL_TABLE: &str = r#"
[[intents]]
key = "contact"
keywords = ["contact", "email"]
response = "Write to hello@example.com"

[[intents]]
key = "services"
keywords = ["service"]
response = "We build websites.\nAnd apps."

[[intents]]
key = "default"
response = "Sorry, try another question."
"#;

/// A table with no "default" entry.
pub const TABLE_WITHOUT_DEFAULT: &str = r#"
[[intents]]
key = "contact"
keywords = ["contact"]
response = "Write to hello@example.com"
"#;
