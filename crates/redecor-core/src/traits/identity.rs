// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity verifier trait for bearer credential validation.

use async_trait::async_trait;

use crate::error::RedecorError;
use crate::types::UserId;

/// Verifies a bearer credential and resolves it to a stable user identity.
///
/// Implementations must validate both the credential's signature against the
/// configured trust anchor and its expiry. Any failure maps to
/// [`RedecorError::Unauthenticated`].
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verifies the given credential and returns the caller's identity.
    async fn verify(&self, credential: &str) -> Result<UserId, RedecorError>;
}
