//! # Intentbot Chat Session
//!
//! File: cli/src/core/session.rs
//!
//! ## Overview
//!
//! A `ChatSession` is the conversation state a front end (the terminal REPL,
//! or the HTTP handler's per-request view) works with. It is built from the
//! pieces it needs rather than reaching for shared globals:
//! - the `IntentTable` to answer from (shared, read-only),
//! - a `TypingDelay` that decides how long the bot "types" before replying,
//! - the transcript of `ChatMessage`s exchanged so far.
//!
//! The transcript lives in memory only and is dropped with the session.
//! The delay is purely presentational: replies come from the table alone.
//!
use crate::core::intent::IntentTable;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Who wrote a transcript message.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One line of the transcript.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

/// Simulated typing time, drawn uniformly from `[min, max]` for every reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    min: Duration,
    max: Duration,
}

impl TypingDelay {
    /// A delay between `min` and `max`. A `max` below `min` is raised to `min`.
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Picks the delay for one reply.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let millis = rand::rng().random_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(millis as u64)
    }
}

/// Conversation state for one user.
#[derive(Debug)]
pub struct ChatSession {
    table: Arc<IntentTable>,
    delay: TypingDelay,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(table: Arc<IntentTable>, delay: TypingDelay) -> Self {
        Self {
            table,
            delay,
            transcript: Vec::new(),
        }
    }

    /// Sends a user message and waits for the bot's reply.
    ///
    /// Blank input is ignored: nothing is recorded and `None` is returned.
    /// Otherwise the trimmed message and the reply are appended to the
    /// transcript and the reply is returned.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.transcript.push(ChatMessage {
            text: text.to_string(),
            sender: Sender::User,
        });

        let wait = self.delay.sample();
        if !wait.is_zero() {
            debug!("Typing for {:?}", wait);
            tokio::time::sleep(wait).await;
        }

        let answer = self.table.match_intent(text);
        debug!("Message answered by intent '{}'", answer.key);
        self.transcript.push(ChatMessage {
            text: answer.response.to_string(),
            sender: Sender::Bot,
        });
        self.transcript.last()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }
}
