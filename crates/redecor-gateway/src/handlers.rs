// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /api/decorate and GET /health, including the mapping from
//! the error taxonomy onto HTTP status codes.

use axum::{
    Json,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

use redecor_core::{DecorationRequest, RedecorError};

use crate::server::GatewayState;

/// Success response body for POST /api/decorate.
#[derive(Debug, Serialize)]
pub struct DecorateResponse {
    /// Base64-encoded redecorated image.
    #[serde(rename = "base64Image")]
    pub base64_image: String,
    /// MIME type of the encoded image.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// POST /api/decorate
///
/// Accepts a multipart form with `image`, `styleName`, and `roomDescription`
/// fields and returns the redecorated image. The service call runs on a
/// detached task so a client disconnect cannot cancel it between the credit
/// debit and its rollback.
pub async fn post_decorate(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();

    let Some(credential) = bearer_token(&headers) else {
        return error_body(
            StatusCode::UNAUTHORIZED,
            "missing bearer credential in Authorization header",
        );
    };
    let credential = credential.to_string();

    let request = match read_multipart(multipart).await {
        Ok(request) => request,
        Err(message) => {
            warn!(request_id = %request_id, %message, "rejected malformed upload");
            return error_body(StatusCode::BAD_REQUEST, &message);
        }
    };

    let service = state.service.clone();
    let handle =
        tokio::spawn(async move { service.handle(&credential, request).await });

    match handle.await {
        Ok(Ok(decoration)) => (
            StatusCode::OK,
            Json(DecorateResponse {
                base64_image: decoration.base64_image,
                mime_type: decoration.mime_type,
            }),
        )
            .into_response(),
        Ok(Err(err)) => {
            let (status, message) = map_error(&err);
            if status.is_server_error() {
                error!(request_id = %request_id, error = %err, "decoration request failed");
            } else {
                warn!(request_id = %request_id, error = %err, "decoration request rejected");
            }
            error_body(status, message)
        }
        Err(join_err) => {
            error!(request_id = %request_id, error = %join_err, "decoration task panicked");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

/// GET /health
///
/// Returns health status of the gateway.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Drain the multipart form into a DecorationRequest.
///
/// Missing fields come back as empty values; the service rejects those with
/// precise messages before touching the ledger. Read failures (truncated
/// bodies, exceeded size limits) surface here as a 400 message.
async fn read_multipart(mut multipart: Multipart) -> Result<DecorationRequest, String> {
    let mut request = DecorationRequest {
        image: Vec::new(),
        mime_type: "application/octet-stream".to_string(),
        style: String::new(),
        room_description: String::new(),
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return Err(format!("failed to read upload: {err}")),
        };

        match field.name() {
            Some("image") => {
                if let Some(content_type) = field.content_type() {
                    request.mime_type = content_type.to_string();
                }
                request.image = field
                    .bytes()
                    .await
                    .map_err(|err| format!("failed to read image field: {err}"))?
                    .to_vec();
            }
            Some("styleName") => {
                request.style = field
                    .text()
                    .await
                    .map_err(|err| format!("failed to read styleName field: {err}"))?;
            }
            Some("roomDescription") => {
                request.room_description = field
                    .text()
                    .await
                    .map_err(|err| format!("failed to read roomDescription field: {err}"))?;
            }
            _ => {
                // Unknown fields are skipped, not rejected.
            }
        }
    }

    Ok(request)
}

/// Map the error taxonomy onto HTTP statuses and caller-facing messages.
///
/// Server-side failures get generic messages; the underlying causes are
/// logged, never surfaced.
fn map_error(err: &RedecorError) -> (StatusCode, &'static str) {
    match err {
        RedecorError::Unauthenticated(_) => {
            (StatusCode::UNAUTHORIZED, "invalid or expired credential")
        }
        RedecorError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "missing required field"),
        RedecorError::ContentBlocked { .. } => (
            StatusCode::BAD_REQUEST,
            "the image or description was blocked by the safety filter; try a different one",
        ),
        RedecorError::QuotaExceeded => (
            StatusCode::FORBIDDEN,
            "credit balance exhausted; add credits to keep decorating",
        ),
        RedecorError::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            "the image service is busy; try again shortly",
        ),
        RedecorError::SynthesisFailed { .. } | RedecorError::Timeout { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "image generation failed; your credit was not spent",
        ),
        RedecorError::Ledger { .. }
        | RedecorError::Config(_)
        | RedecorError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
