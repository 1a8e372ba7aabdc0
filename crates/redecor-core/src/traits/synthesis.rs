// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synthesis client trait for the external image-generation service.

use async_trait::async_trait;

use crate::error::RedecorError;
use crate::types::SynthesisResult;

/// Client for the external image-synthesis service.
///
/// Implementations must interpret the service's response into the closed
/// [`SynthesisResult`] enumeration: a policy refusal is `Blocked`, a
/// well-formed response with no image payload is `NoImage`, and any response
/// shape deviation or transport fault is a typed error -- never a panic and
/// never string matching on error text.
#[async_trait]
pub trait SynthesisClient: Send + Sync {
    /// Submits one image plus a redecoration instruction and returns the
    /// interpreted outcome. Upstream rate limiting maps to
    /// [`RedecorError::RateLimited`].
    async fn synthesize(
        &self,
        image: &[u8],
        mime_type: &str,
        instruction: &str,
    ) -> Result<SynthesisResult, RedecorError>;
}
