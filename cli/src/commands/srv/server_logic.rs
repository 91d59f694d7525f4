//! # Intentbot HTTP Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//!
//! ## Overview
//!
//! Assembles the Axum application and runs it:
//! 1. Pick a free port, starting at the configured one
//! 2. Mount the API under `/api` and, if configured, the static site as fallback
//! 3. Add request tracing and (optionally) permissive CORS
//! 4. Serve until Ctrl+C or SIGTERM, then shut down gracefully
//!
use super::api::{self, AppState};
use super::config::ServerConfig;
use crate::core::error::Result;
use anyhow::Context;
use axum::Router;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

/// How many consecutive ports to try before giving up.
const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run HTTP Server (`run_server`)
///
/// Binds the first free port at or after `config.port` and serves the chat
/// API (plus the static site, if any) until a shutdown signal arrives.
///
/// ## Errors
///
/// Fails if no port in range can be bound or the server stops with an error.
pub async fn run_server(config: ServerConfig, state: AppState) -> Result<()> {
    let listener = bind_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read the bound address")?;

    let app = create_app(&config, state);

    println!("\n=================================================================");
    println!("💬 Chat API:          http://{}/api/chat", addr);
    match &config.site_dir {
        Some(dir) => println!("📂 Serving site from: {}", dir.display()),
        None => println!("📂 Static site:       (none)"),
    }
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");
    info!("Starting server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Builds the router: API under `/api`, optional static site for everything else.
pub fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default())
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let mut router = Router::new().nest("/api", api::routes());
    if let Some(dir) = &config.site_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer)
            .layer(cors_layer),
    )
}

/// Binds `host:start_port`, moving up one port at a time while the port is taken.
///
/// The listener is returned bound, so the port cannot be lost between the
/// check and the start of the server.
async fn bind_available_port(host: IpAddr, start_port: u16, max_attempts: u8) -> Result<TcpListener> {
    let mut port = start_port;
    for attempt in 1..=max_attempts {
        let addr = SocketAddr::new(host, port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if port != start_port {
                    info!("Port {} was unavailable, using {} instead.", start_port, port);
                }
                return Ok(listener);
            }
            Err(e) => {
                warn!("Attempt {}: cannot bind {} ({}).", attempt, addr, e);
                port = match port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }
    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        host,
        start_port,
        max_attempts
    )
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
