//! # Intentbot Core
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the pieces every command builds on:
//! - `intent`: the intent table and the keyword responder
//! - `session`: conversation state (transcript, typing delay) for front ends
//! - `config`: configuration loading, merging and validation
//! - `error`: error types and the crate-wide `Result` alias
//!
//! Commands load a `Config` once, build the `IntentTable` it points to, and
//! hand both to whichever front end they drive (one-shot answer, terminal
//! chat, HTTP endpoint).
//!
pub mod config;
pub mod error;
pub mod intent;
pub mod session;
