// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini `generateContent` request/response types.
//!
//! Response types are deliberately lenient: every field that has ever been
//! observed missing is optional or defaulted, so shape deviations surface as
//! a typed no-image outcome rather than a deserialization failure.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the `models/{model}:generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Request contents (one entry carrying the image and instruction).
    pub contents: Vec<Content>,

    /// Generation tuning; used to request image output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Generation tuning parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Output modalities to request (e.g. `["IMAGE"]`).
    pub response_modalities: Vec<String>,
}

/// A content entry: an ordered list of parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single content part -- text, inline binary data, or something newer
/// this client does not know about (both fields absent).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Base64-encoded binary payload with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

// --- Response types ---

/// A response from the `generateContent` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// A generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Feedback about the prompt itself; present when the request was rejected
/// before generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

// --- Error body types ---

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Error detail within the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "image/jpeg".into(),
                            data: "AAAA".into(),
                        }),
                    },
                    Part {
                        text: Some("redecorate".into()),
                        inline_data: None,
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["IMAGE".into()],
            }),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"inlineData\""));
        assert!(json.contains("\"mimeType\""));
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"responseModalities\""));
        // Absent optional fields are omitted, not null.
        assert!(!json.contains("null"));
    }

    #[test]
    fn response_with_missing_fields_deserializes() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
        assert!(response.prompt_feedback.is_none());

        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{}]}"#).unwrap();
        assert!(response.candidates[0].content.is_none());
        assert!(response.candidates[0].finish_reason.is_none());
    }

    #[test]
    fn unknown_part_kinds_deserialize_to_empty_part() {
        let part: Part =
            serde_json::from_str(r#"{"functionCall": {"name": "x"}}"#).unwrap();
        assert!(part.text.is_none());
        assert!(part.inline_data.is_none());
    }
}
