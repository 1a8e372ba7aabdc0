// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini image generation API.
//!
//! Provides [`GeminiClient`] which handles request construction,
//! authentication, and interpretation of the response into the closed
//! [`SynthesisResult`] enumeration.
//!
//! The client performs exactly one outbound call per `synthesize`: a retry
//! after an ambiguous failure could generate (and bill) a second image for
//! a request that will only ever be credited once.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use redecor_core::{GeneratedImage, RedecorError, SynthesisResult};

use crate::types::{
    ApiErrorResponse, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, InlineData, Part,
};

/// Finish reasons that indicate a content-policy refusal.
const SAFETY_FINISH_REASONS: &[&str] = &["SAFETY", "IMAGE_SAFETY", "PROHIBITED_CONTENT"];

/// HTTP client for Gemini `generateContent` calls.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key for authentication
    /// * `model` - Image generation model identifier
    /// * `base_url` - API base URL (overridable for tests and proxies)
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_key: &str,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, RedecorError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                RedecorError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RedecorError::SynthesisFailed {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submits one image + instruction and interprets the response.
    pub async fn generate(
        &self,
        image: &[u8],
        mime_type: &str,
        instruction: &str,
    ) -> Result<SynthesisResult, RedecorError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: mime_type.to_string(),
                            data: BASE64.encode(image),
                        }),
                    },
                    Part {
                        text: Some(instruction.to_string()),
                        inline_data: None,
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            }),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RedecorError::SynthesisFailed {
                message: "HTTP request to synthesis API failed".to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "synthesis response received");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("synthesis API reported rate limiting");
            return Err(RedecorError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "synthesis API error ({}): {}",
                    api_err.error.status, api_err.error.message
                ),
                Err(_) => format!("synthesis API returned {status}"),
            };
            return Err(RedecorError::SynthesisFailed {
                message,
                source: None,
            });
        }

        let body: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| RedecorError::SynthesisFailed {
                    message: "failed to parse synthesis API response".to_string(),
                    source: Some(Box::new(e)),
                })?;

        interpret_response(body)
    }
}

/// Map a well-formed API response onto the closed synthesis outcome set.
///
/// Missing candidates, missing parts, and text-only parts are `NoImage`;
/// a block reason or safety finish is `Blocked`; an undecodable payload is
/// a fault.
fn interpret_response(
    response: GenerateContentResponse,
) -> Result<SynthesisResult, RedecorError> {
    if let Some(feedback) = &response.prompt_feedback
        && let Some(reason) = &feedback.block_reason
    {
        return Ok(SynthesisResult::Blocked {
            reason: reason.clone(),
        });
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Ok(SynthesisResult::NoImage);
    };

    if let Some(reason) = &candidate.finish_reason
        && SAFETY_FINISH_REASONS.contains(&reason.as_str())
    {
        return Ok(SynthesisResult::Blocked {
            reason: reason.clone(),
        });
    }

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    for part in parts {
        if let Some(inline) = part.inline_data {
            let data = BASE64.decode(inline.data.as_bytes()).map_err(|e| {
                RedecorError::SynthesisFailed {
                    message: "synthesis API returned undecodable image data".to_string(),
                    source: Some(Box::new(e)),
                }
            })?;
            return Ok(SynthesisResult::Image(GeneratedImage {
                data,
                mime_type: inline.mime_type,
            }));
        }
    }

    Ok(SynthesisResult::NoImage)
}
