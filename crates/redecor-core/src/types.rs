// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the collaborator traits and the request handler.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Stable identifier for an authenticated user, produced by the identity
/// verifier. Opaque to the rest of the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role attached to a credit account.
///
/// `Admin` accounts bypass the balance check and are never debited.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Normal,
    Admin,
}

impl Role {
    /// Whether this role is exempt from quota checks and debits.
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A user's credit account as read from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditAccount {
    /// Remaining generation credits. Never negative.
    pub balance: i64,
    /// Account role.
    pub role: Role,
}

/// An incoming decoration request. Ephemeral; never persisted.
#[derive(Debug, Clone)]
pub struct DecorationRequest {
    /// Raw bytes of the uploaded room photo.
    pub image: Vec<u8>,
    /// MIME type of the uploaded photo (e.g. "image/jpeg").
    pub mime_type: String,
    /// Requested decorating style (e.g. "Scandinavian").
    pub style: String,
    /// Free-text description of the room (e.g. "a small bedroom").
    pub room_description: String,
}

/// An image produced by the synthesis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Decoded image bytes.
    pub data: Vec<u8>,
    /// MIME type reported by the synthesis service.
    pub mime_type: String,
}

/// Outcome of a synthesis call that produced a well-formed response.
///
/// Transport faults, malformed responses, and upstream rate limiting are
/// reported through [`crate::RedecorError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisResult {
    /// The service returned a redecorated image.
    Image(GeneratedImage),
    /// The service refused on content-policy grounds.
    Blocked { reason: String },
    /// The response was well-formed but carried no image payload.
    NoImage,
}

/// A completed decoration, ready to return to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    /// Base64-encoded redecorated image.
    pub base64_image: String,
    /// MIME type of the encoded image.
    pub mime_type: String,
}
