//! # Intentbot HTTP API
//!
//! File: cli/src/commands/srv/api.rs
//!
//! ## Overview
//!
//! JSON routes used by the website's chat widget. All of them are mounted
//! under `/api` by `server_logic::create_app`.
//!
//! | Method | Path                 | Body / Response                                             |
//! |--------|----------------------|-------------------------------------------------------------|
//! | POST   | `/api/chat`          | `{"message"}` → `{"intent","response","sender","typing_delay_ms"}` |
//! | GET    | `/api/quick-replies` | → `{"bot_name","quick_replies"}`                            |
//! | GET    | `/api/health`        | → `ok`                                                      |
//!
//! The server answers right away. `typing_delay_ms` is a hint telling the
//! widget how long to show its typing indicator before displaying the reply.
//! `response` keeps its `\n` line breaks; the widget must render them.
//!
use crate::core::config::ChatConfig;
use crate::core::intent::IntentTable;
use crate::core::session::{Sender, TypingDelay};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// State shared by every request. Read-only after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    table: Arc<IntentTable>,
    chat: Arc<ChatConfig>,
    delay: TypingDelay,
}

impl AppState {
    pub fn new(table: Arc<IntentTable>, chat: ChatConfig) -> Self {
        let delay = chat.typing_delay();
        Self {
            table,
            chat: Arc::new(chat),
            delay,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ChatReply {
    pub intent: String,
    pub response: String,
    pub sender: Sender,
    pub typing_delay_ms: u64,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct QuickReplies {
    pub bot_name: String,
    pub quick_replies: Vec<String>,
}

/// Routes relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/quick-replies", get(quick_replies))
        .route("/health", get(health))
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Json<ChatReply> {
    let answer = state.table.match_intent(&request.message);
    debug!(
        "Answered {:?} with intent '{}' (keyword {:?})",
        request.message, answer.key, answer.keyword
    );
    Json(ChatReply {
        intent: answer.key.to_string(),
        response: answer.response.to_string(),
        sender: Sender::Bot,
        typing_delay_ms: state.delay.sample().as_millis() as u64,
    })
}

async fn quick_replies(State(state): State<AppState>) -> Json<QuickReplies> {
    Json(QuickReplies {
        bot_name: state.chat.bot_name.clone(),
        quick_replies: state.chat.quick_replies.clone(),
    })
}

async fn health() -> &'static str {
    "ok"
}
