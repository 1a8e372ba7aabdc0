// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The decoration request handler.
//!
//! Orchestrates one request end to end: verify the credential, validate the
//! input, reserve a credit, call the synthesis service, and either commit
//! the reservation (success) or roll it back (every other terminal
//! outcome). The rollback invariant: a request that debited the ledger and
//! did not return an image restores the balance to exactly its pre-request
//! value, via an unconditional increment -- never by writing back a
//! remembered number.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, error, info, warn};

use redecor_core::{
    CreditLedger, Decoration, DecorationRequest, IdentityVerifier, RedecorError,
    SynthesisClient, SynthesisResult, UserId,
};

use crate::prompt;

/// Orchestrates decoration requests against the three collaborator seams.
///
/// All collaborators are injected at construction so tests can substitute
/// fakes; the service holds no mutable state of its own.
pub struct DecorationService {
    verifier: Arc<dyn IdentityVerifier>,
    ledger: Arc<dyn CreditLedger>,
    synthesis: Arc<dyn SynthesisClient>,
    synthesis_timeout: Duration,
}

impl DecorationService {
    /// Create a service over the given collaborators.
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        ledger: Arc<dyn CreditLedger>,
        synthesis: Arc<dyn SynthesisClient>,
        synthesis_timeout: Duration,
    ) -> Self {
        Self {
            verifier,
            ledger,
            synthesis,
            synthesis_timeout,
        }
    }

    /// Handle one decoration request.
    ///
    /// Side effects per request: at most one ledger debit, at most one
    /// rollback credit, at most one synthesis call. Not idempotent by
    /// design -- every successful call is a separate paid generation.
    pub async fn handle(
        &self,
        credential: &str,
        request: DecorationRequest,
    ) -> Result<Decoration, RedecorError> {
        // Authentication and validation fail before any ledger access.
        let user = self.verifier.verify(credential).await?;
        validate(&request)?;

        let account = self.ledger.account(&user).await?;
        let privileged = account.role.is_privileged();
        if !privileged && account.balance <= 0 {
            debug!(user = %user, "quota exhausted");
            return Err(RedecorError::QuotaExceeded);
        }

        let mut debited = false;
        if !privileged {
            if !self.ledger.debit_one(&user).await? {
                // A concurrent request drained the last credit between the
                // read and the debit.
                debug!(user = %user, "debit lost the race, quota exhausted");
                return Err(RedecorError::QuotaExceeded);
            }
            debited = true;
        }
        debug!(user = %user, debited, style = %request.style, "calling synthesis");

        let instruction = prompt::build_instruction(&request.style, &request.room_description);
        let outcome = match tokio::time::timeout(
            self.synthesis_timeout,
            self.synthesis
                .synthesize(&request.image, &request.mime_type, &instruction),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RedecorError::Timeout {
                duration: self.synthesis_timeout,
            }),
        };

        match outcome {
            Ok(SynthesisResult::Image(image)) => {
                info!(user = %user, bytes = image.data.len(), "decoration generated");
                Ok(Decoration {
                    base64_image: BASE64.encode(&image.data),
                    mime_type: image.mime_type,
                })
            }
            Ok(SynthesisResult::Blocked { reason }) => {
                warn!(user = %user, reason = %reason, "generation blocked by content policy");
                self.rollback(&user, debited).await;
                Err(RedecorError::ContentBlocked { reason })
            }
            Ok(SynthesisResult::NoImage) => {
                warn!(user = %user, "synthesis response carried no image");
                self.rollback(&user, debited).await;
                Err(RedecorError::SynthesisFailed {
                    message: "no image in synthesis response".to_string(),
                    source: None,
                })
            }
            Err(err) => {
                warn!(user = %user, error = %err, "synthesis call failed");
                self.rollback(&user, debited).await;
                Err(err)
            }
        }
    }

    /// Restore a debited credit. No-op when nothing was debited.
    ///
    /// A failed restore means the user lost a credit for nothing; that is
    /// logged loudly but the original failure is still what the caller sees.
    async fn rollback(&self, user: &UserId, debited: bool) {
        if !debited {
            return;
        }
        match self.ledger.credit_one(user).await {
            Ok(()) => debug!(user = %user, "debited credit restored"),
            Err(err) => {
                error!(user = %user, error = %err, "failed to restore debited credit")
            }
        }
    }
}

/// Reject requests with missing fields before any side effect.
fn validate(request: &DecorationRequest) -> Result<(), RedecorError> {
    if request.image.is_empty() {
        return Err(RedecorError::InvalidInput("image must not be empty".into()));
    }
    if request.style.is_empty() {
        return Err(RedecorError::InvalidInput(
            "styleName must not be empty".into(),
        ));
    }
    if request.room_description.is_empty() {
        return Err(RedecorError::InvalidInput(
            "roomDescription must not be empty".into(),
        ));
    }
    Ok(())
}
