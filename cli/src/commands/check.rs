//! # Intentbot Check Command
//!
//! File: cli/src/commands/check.rs
//!
//! ## Overview
//!
//! `intentbot check` loads an intent table exactly the way the other commands
//! would, runs the full validation, and prints a short summary in table order.
//! Use it after editing a table file: a table that passes here will never fail
//! at chat time.
//!
//! ## Examples
//!
//! ```bash
//! # Check the configured table (or the built-in one)
//! intentbot check
//!
//! # Check a specific file and list every keyword
//! intentbot check ./intents.toml --keywords
//! ```
//!
use super::GlobalArgs;
use crate::core::config;
use crate::core::error::Result;
use crate::core::intent::{IntentTable, DEFAULT_KEY};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// # Check Command Arguments (`CheckArgs`)
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Table file to check. Defaults to `--intents`, then the configured table,
    /// then the built-in one.
    pub file: Option<PathBuf>,

    /// List each intent's keywords under it.
    #[arg(long)]
    pub keywords: bool,
}

/// # Handle Check Command (`handle_check`)
///
/// ## Errors
///
/// Returns the validation error (an invalid-configuration error naming the
/// offending entry) when the table is rejected.
pub async fn handle_check(args: CheckArgs, global: &GlobalArgs) -> Result<()> {
    let config = config::load_config(global.config.as_deref())?;
    let source = args.file.as_deref().or(global.intents.as_deref());
    let table = config::load_intent_table(&config, source)?;

    let label = source
        .or(config.intents_file.as_deref())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in table".to_string());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Checked {}", label)?;
    write_summary(&mut out, &table, args.keywords)?;
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, table: &IntentTable, keywords: bool) -> io::Result<()> {
    let width = table
        .entries()
        .iter()
        .map(|e| e.key.chars().count())
        .max()
        .unwrap_or(0);

    for (i, entry) in table.entries().iter().enumerate() {
        if entry.key == DEFAULT_KEY {
            writeln!(out, "{:>3}. {:<width$}  (fallback)", i + 1, entry.key)?;
            continue;
        }
        let count = entry.keywords.len();
        writeln!(
            out,
            "{:>3}. {:<width$}  {} keyword{}",
            i + 1,
            entry.key,
            count,
            if count == 1 { "" } else { "s" }
        )?;
        if keywords {
            for keyword in &entry.keywords {
                writeln!(out, "       - {:?}", keyword)?;
            }
        }
    }
    writeln!(out, "OK: {} intents", table.entries().len())
}
