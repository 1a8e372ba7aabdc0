// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini image synthesis adapter for the redecor service.
//!
//! This crate implements [`SynthesisClient`] against the Gemini
//! `generateContent` API, translating its response shapes into the closed
//! outcome set the decoration handler branches on.

pub mod client;
pub mod types;

use async_trait::async_trait;

use redecor_core::{RedecorError, SynthesisClient, SynthesisResult};

pub use client::GeminiClient;

#[async_trait]
impl SynthesisClient for GeminiClient {
    async fn synthesize(
        &self,
        image: &[u8],
        mime_type: &str,
        instruction: &str,
    ) -> Result<SynthesisResult, RedecorError> {
        self.generate(image, mime_type, instruction).await
    }
}
