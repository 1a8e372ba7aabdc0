// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer credential verification for the redecor service.
//!
//! Implements [`IdentityVerifier`] with Ed25519 signed tokens carrying an
//! embedded expiry, verified against a configured trust anchor (the
//! hex-encoded verifying key). Token issuing lives here too, for the
//! operator CLI and tests; the serving path never signs.

pub mod token;

use async_trait::async_trait;
use tracing::debug;

use redecor_core::{IdentityVerifier, RedecorError, UserId};

pub use token::{TokenSigner, TokenVerifier};

#[async_trait]
impl IdentityVerifier for TokenVerifier {
    async fn verify(&self, credential: &str) -> Result<UserId, RedecorError> {
        let user = self.verify_token(credential)?;
        debug!(user = %user, "bearer credential verified");
        Ok(user)
    }
}
