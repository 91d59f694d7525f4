//! # Intentbot CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behavior of the `intentbot` binary: `--help`, `--version`,
//! and how configuration errors are reported.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_main_help_flag() {
    let dir = tempdir().unwrap();
    intentbot_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ask").and(predicate::str::contains("chat")));
}

#[test]
fn test_main_version_flag() {
    let dir = tempdir().unwrap();
    intentbot_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_fails() {
    let dir = tempdir().unwrap();
    intentbot_cmd(dir.path()).assert().failure();
}

/// A project `.intentbot.toml` in the working directory is picked up.
#[test]
fn test_project_config_selects_table() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "bot-intents.toml", SMALL_TABLE);
    write_file(
        dir.path(),
        ".intentbot.toml",
        "[intents]\nfile = \"bot-intents.toml\"\n",
    );

    intentbot_cmd(dir.path())
        .args(["ask", "xyzzy"])
        .assert()
        .success()
        .stdout("Sorry, try another question.\n");
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    let config = write_file(
        dir.path(),
        "bad.toml",
        "[chat]\ntyping_delay_min_ms = 5\ntyping_delay_max_ms = 1\n",
    );

    intentbot_cmd(dir.path())
        .args(["--config", config.to_str().unwrap(), "ask", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("typing_delay_min_ms"));
}
