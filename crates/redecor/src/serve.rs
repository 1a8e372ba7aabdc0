// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `redecor serve` command implementation.
//!
//! Wires the concrete collaborators (token verifier, SQLite ledger, Gemini
//! client) into the decoration service and starts the gateway. All
//! collaborators are constructed here and injected; nothing module-level.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use redecor_auth::TokenVerifier;
use redecor_config::RedecorConfig;
use redecor_core::RedecorError;
use redecor_gateway::{GatewayState, ServerConfig, start_server};
use redecor_gemini::GeminiClient;
use redecor_ledger::SqliteLedger;
use redecor_service::DecorationService;

/// Runs the `redecor serve` command.
pub async fn run_serve(config: RedecorConfig) -> Result<(), RedecorError> {
    init_tracing(&config.service.log_level);
    info!("starting redecor serve");

    let trust_anchor = config.auth.trust_anchor.as_deref().ok_or_else(|| {
        RedecorError::Config(
            "auth.trust_anchor must be set to serve (run `redecor keygen`)".into(),
        )
    })?;
    let verifier = Arc::new(TokenVerifier::from_hex(trust_anchor)?);

    let ledger = Arc::new(
        SqliteLedger::open(
            &config.storage.database_path,
            config.credits.initial_balance,
        )
        .await?,
    );

    let api_key = config
        .gemini
        .api_key
        .clone()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .ok_or_else(|| {
            RedecorError::Config("gemini.api_key or GEMINI_API_KEY must be set".into())
        })?;
    let synthesis_timeout = Duration::from_secs(config.gemini.timeout_secs);
    let synthesis = Arc::new(GeminiClient::new(
        &api_key,
        config.gemini.model.clone(),
        config.gemini.base_url.clone(),
        synthesis_timeout,
    )?);

    info!(
        model = %config.gemini.model,
        database = %config.storage.database_path,
        "collaborators initialized"
    );

    let service = Arc::new(DecorationService::new(
        verifier,
        ledger,
        synthesis,
        synthesis_timeout,
    ));

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        allowed_origins: config.server.allowed_origins.clone(),
        max_upload_bytes: config.server.max_upload_bytes,
    };
    let state = GatewayState {
        service,
        start_time: Instant::now(),
    };
    start_server(&server_config, state).await
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level so operators can
/// raise verbosity without touching config files.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
