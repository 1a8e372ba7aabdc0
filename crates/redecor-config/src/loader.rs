// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./redecor.toml` > `~/.config/redecor/redecor.toml`
//! > `/etc/redecor/redecor.toml` with environment variable overrides via the
//! `REDECOR_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::RedecorConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/redecor/redecor.toml` (system-wide)
/// 3. `~/.config/redecor/redecor.toml` (user XDG config)
/// 4. `./redecor.toml` (local directory)
/// 5. `REDECOR_*` environment variables
pub fn load_config() -> Result<RedecorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RedecorConfig::default()))
        .merge(Toml::file("/etc/redecor/redecor.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("redecor/redecor.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("redecor.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<RedecorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RedecorConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RedecorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RedecorConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `REDECOR_SERVER_MAX_UPLOAD_BYTES`
/// must map to `server.max_upload_bytes`, not `server.max.upload.bytes`.
fn env_provider() -> Env {
    Env::prefixed("REDECOR_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: REDECOR_GEMINI_API_KEY -> "gemini_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("credits_", "credits.", 1)
            .replacen("service_", "service.", 1);
        mapped.into()
    })
}
