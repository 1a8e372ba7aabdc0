// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the redecor service.

use thiserror::Error;

/// The primary error type used across the redecor collaborator traits and
/// the decoration request handler.
///
/// Every terminal outcome of a decoration request other than success is one
/// of these variants; the gateway maps them onto HTTP status codes.
#[derive(Debug, Error)]
pub enum RedecorError {
    /// Bearer credential is missing, malformed, expired, or forged.
    #[error("authentication failed: {0}")]
    Unauthenticated(String),

    /// A required request field is missing or empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The caller's credit balance is exhausted.
    #[error("credit balance exhausted")]
    QuotaExceeded,

    /// The synthesis service refused the request on content-policy grounds.
    #[error("generation blocked by content policy: {reason}")]
    ContentBlocked { reason: String },

    /// The synthesis service reported upstream rate limiting.
    #[error("synthesis service rate limited")]
    RateLimited,

    /// The synthesis call failed or its response carried no usable image.
    #[error("synthesis failed: {message}")]
    SynthesisFailed {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Credit ledger read or write failed.
    #[error("ledger error: {source}")]
    Ledger {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Configuration errors (missing keys, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
