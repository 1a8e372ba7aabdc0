// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use redecor_service::DecorationService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The decoration request handler.
    pub service: Arc<DecorationService>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Gateway server configuration (mirrors ServerConfig from redecor-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Origins allowed for cross-origin calls. Empty = same-origin only.
    pub allowed_origins: Vec<String>,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
}

/// Build the gateway router.
///
/// Routes:
/// - POST /api/decorate (bearer auth checked in the handler chain)
/// - GET /health (unauthenticated, for load balancers and systemd)
pub fn build_router(config: &ServerConfig, state: GatewayState) -> Router {
    Router::new()
        .route("/api/decorate", post(handlers::post_decorate))
        .route("/health", get(handlers::get_health))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Restrict cross-origin calls to the configured origin list.
///
/// Unparseable entries are skipped (and already rejected by config
/// validation); an empty list yields the default deny-all CORS posture.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until ctrl-c.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
) -> Result<(), redecor_core::RedecorError> {
    let app = build_router(config, state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        redecor_core::RedecorError::Internal(format!("failed to bind gateway to {addr}: {e}"))
    })?;

    tracing::info!("gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            redecor_core::RedecorError::Internal(format!("gateway server error: {e}"))
        })?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
