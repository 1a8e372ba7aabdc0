// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static identity verifier fake backed by a token table.

use std::collections::HashMap;

use async_trait::async_trait;

use redecor_core::{IdentityVerifier, RedecorError, UserId};

/// An [`IdentityVerifier`] that resolves credentials from a fixed table.
///
/// Unknown credentials are rejected, so tests can cover both the
/// authenticated and unauthenticated paths.
#[derive(Debug, Default)]
pub struct StaticVerifier {
    tokens: HashMap<String, UserId>,
}

impl StaticVerifier {
    /// Create an empty verifier (rejects everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a verifier that accepts a single credential.
    pub fn single(credential: &str, user: &str) -> Self {
        let mut verifier = Self::new();
        verifier.insert(credential, user);
        verifier
    }

    /// Register a credential-to-user mapping.
    pub fn insert(&mut self, credential: &str, user: &str) {
        self.tokens
            .insert(credential.to_string(), UserId(user.to_string()));
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, credential: &str) -> Result<UserId, RedecorError> {
        self.tokens
            .get(credential)
            .cloned()
            .ok_or_else(|| RedecorError::Unauthenticated("unknown credential".into()))
    }
}
