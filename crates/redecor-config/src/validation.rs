// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, decodable trust anchors, and
//! sane timeout bounds.

use crate::diagnostic::ConfigError;
use crate::model::RedecorConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RedecorConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate server.host is not empty and looks like an IP or hostname.
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "server.host `{host}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    if config.server.max_upload_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "server.max_upload_bytes must be greater than zero".to_string(),
        });
    }

    for (i, origin) in config.server.allowed_origins.iter().enumerate() {
        if origin.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("server.allowed_origins[{i}] must not be empty"),
            });
        }
    }

    // Validate auth.trust_anchor decodes to a 32-byte Ed25519 key when set.
    if let Some(anchor) = &config.auth.trust_anchor {
        match hex::decode(anchor) {
            Ok(bytes) if bytes.len() == 32 => {}
            Ok(bytes) => errors.push(ConfigError::Validation {
                message: format!(
                    "auth.trust_anchor must decode to 32 bytes, got {}",
                    bytes.len()
                ),
            }),
            Err(_) => errors.push(ConfigError::Validation {
                message: "auth.trust_anchor must be a hex-encoded Ed25519 verifying key"
                    .to_string(),
            }),
        }
    }

    // Validate synthesis timeout stays in the sane band.
    if config.gemini.timeout_secs == 0 || config.gemini.timeout_secs > 600 {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.timeout_secs must be between 1 and 600, got {}",
                config.gemini.timeout_secs
            ),
        });
    }

    if config.gemini.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.base_url must not be empty".to_string(),
        });
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    // Validate database_path is not empty.
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate starting balance is non-negative.
    if config.credits.initial_balance < 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "credits.initial_balance must be non-negative, got {}",
                config.credits.initial_balance
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
