// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the redecor service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level redecor configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RedecorConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Bearer credential verification settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Image synthesis API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Credit ledger storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Credit provisioning settings.
    #[serde(default)]
    pub credits: CreditsConfig,

    /// Service-wide behavior settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to make cross-origin calls. Empty list means
    /// same-origin only.
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

/// Bearer credential verification configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Hex-encoded Ed25519 verifying key that bearer tokens must be signed
    /// with. `None` makes `serve` refuse to start (fail-closed).
    #[serde(default)]
    pub trust_anchor: Option<String>,
}

/// Image synthesis API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` falls back to the `GEMINI_API_KEY` environment
    /// variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Image generation model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the synthesis API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request synthesis timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    90
}

/// Credit ledger storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "redecor.db".to_string()
}

/// Credit provisioning configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CreditsConfig {
    /// Balance granted to an account the first time its user is seen.
    #[serde(default = "default_initial_balance")]
    pub initial_balance: i64,
}

impl Default for CreditsConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
        }
    }
}

fn default_initial_balance() -> i64 {
    3
}

/// Service-wide behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
