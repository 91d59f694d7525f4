//! # Intentbot CLI Ask Integration Tests
//!
//! File: cli/tests/ask.rs
//!
//! ## Overview
//!
//! Integration tests for `intentbot ask`, covering the matching rules end to
//! end: case and whitespace handling, first-match ordering, the default
//! fallback and table validation at startup.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_ask_builtin_table() {
    let dir = tempdir().unwrap();
    intentbot_cmd(dir.path())
        .args(["ask", "SERVICES", "please"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "We offer comprehensive digital solutions including:\n\n",
        ));
}

#[test]
fn test_ask_case_insensitive() {
    let dir = tempdir().unwrap();
    let lower = intentbot_cmd(dir.path())
        .args(["ask", "services please"])
        .output()
        .unwrap();
    let upper = intentbot_cmd(dir.path())
        .args(["ask", "SERVICES please"])
        .output()
        .unwrap();
    assert!(lower.status.success());
    assert_eq!(lower.stdout, upper.stdout);
}

#[test]
fn test_ask_first_match_wins() {
    let dir = tempdir().unwrap();
    let table = write_file(dir.path(), "intents.toml", SMALL_TABLE);
    intentbot_cmd(dir.path())
        .args(["--intents", table.to_str().unwrap()])
        .args(["ask", "--show-intent", "service and contact info"])
        .assert()
        .success()
        .stdout("[contact]\nWrite to hello@example.com\n");
}

#[test]
fn test_ask_default_and_blank() {
    let dir = tempdir().unwrap();
    let table = write_file(dir.path(), "intents.toml", SMALL_TABLE);
    for message in ["xyzzy plugh", "   "] {
        intentbot_cmd(dir.path())
            .env("INTENTBOT_INTENTS", &table)
            .args(["ask", message])
            .assert()
            .success()
            .stdout("Sorry, try another question.\n");
    }
}

#[test]
fn test_ask_json_keeps_newlines() {
    let dir = tempdir().unwrap();
    let table = write_file(dir.path(), "intents.toml", SMALL_TABLE);
    let output = intentbot_cmd(dir.path())
        .args(["--intents", table.to_str().unwrap(), "ask", "--json", "services?"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["intent"], "services");
    assert_eq!(value["response"], "We build websites.\nAnd apps.");
}

#[test]
fn test_ask_rejects_table_without_default() {
    let dir = tempdir().unwrap();
    let table = write_file(dir.path(), "intents.toml", TABLE_WITHOUT_DEFAULT);
    intentbot_cmd(dir.path())
        .args(["--intents", table.to_str().unwrap(), "ask", "contact"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no \"default\" entry"));
}

#[test]
fn test_ask_requires_message() {
    let dir = tempdir().unwrap();
    intentbot_cmd(dir.path()).arg("ask").assert().failure();
}
