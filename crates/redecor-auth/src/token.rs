// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ed25519 signed bearer tokens with embedded expiry.
//!
//! Token wire format: `<hex user id>.<unix expiry seconds>.<hex signature>`,
//! where the signature covers the first two segments verbatim. All three
//! segments are dot-free by construction, so parsing is an exact
//! three-way split.

use chrono::Utc;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use redecor_core::{RedecorError, UserId};

/// Issues signed bearer tokens. Held by the operator CLI and tests; the
/// serving path only ever verifies.
pub struct TokenSigner {
    signing_key: SigningKey,
}

impl TokenSigner {
    /// Generate a new random signing key.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Reconstruct a signer from a hex-encoded 32-byte private key.
    pub fn from_hex(private_hex: &str) -> Result<Self, RedecorError> {
        let bytes = hex::decode(private_hex)
            .map_err(|_| RedecorError::Config("signing key must be hex-encoded".into()))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| {
            RedecorError::Config("signing key must decode to 32 bytes".into())
        })?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&bytes),
        })
    }

    /// Hex-encoded private key (for operator storage).
    pub fn private_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// Hex-encoded verifying key. This is the trust anchor the server
    /// configures.
    pub fn public_hex(&self) -> String {
        hex::encode(VerifyingKey::from(&self.signing_key).to_bytes())
    }

    /// Issue a token for `user` valid for `ttl_secs` from now.
    pub fn issue(&self, user: &UserId, ttl_secs: i64) -> String {
        let expiry = Utc::now().timestamp() + ttl_secs;
        self.issue_with_expiry(user, expiry)
    }

    /// Issue a token with an explicit unix expiry. Exposed so tests can mint
    /// already-expired tokens.
    pub fn issue_with_expiry(&self, user: &UserId, expiry_unix: i64) -> String {
        let payload = format!("{}.{expiry_unix}", hex::encode(user.0.as_bytes()));
        let signature = self.signing_key.sign(payload.as_bytes());
        format!("{payload}.{}", hex::encode(signature.to_bytes()))
    }
}

/// Verifies signed bearer tokens against a configured trust anchor.
pub struct TokenVerifier {
    verifying_key: VerifyingKey,
}

impl TokenVerifier {
    /// Build a verifier from a hex-encoded Ed25519 verifying key.
    pub fn from_hex(trust_anchor: &str) -> Result<Self, RedecorError> {
        let bytes = hex::decode(trust_anchor)
            .map_err(|_| RedecorError::Config("trust anchor must be hex-encoded".into()))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| {
            RedecorError::Config("trust anchor must decode to 32 bytes".into())
        })?;
        let verifying_key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| RedecorError::Config(format!("invalid trust anchor: {e}")))?;
        Ok(Self { verifying_key })
    }

    /// Verify a token's shape, signature, and expiry, yielding the user id.
    pub fn verify_token(&self, token: &str) -> Result<UserId, RedecorError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [user_hex, expiry_str, sig_hex] = segments.as_slice() else {
            return Err(RedecorError::Unauthenticated("malformed token".into()));
        };

        let sig_bytes = hex::decode(sig_hex)
            .map_err(|_| RedecorError::Unauthenticated("malformed token signature".into()))?;
        let sig_bytes: [u8; 64] = sig_bytes
            .try_into()
            .map_err(|_| RedecorError::Unauthenticated("malformed token signature".into()))?;
        let signature = Signature::from_bytes(&sig_bytes);

        // Signature check before expiry: a forged token learns nothing about
        // clock handling.
        let payload = format!("{user_hex}.{expiry_str}");
        self.verifying_key
            .verify(payload.as_bytes(), &signature)
            .map_err(|_| {
                RedecorError::Unauthenticated("token signature verification failed".into())
            })?;

        let expiry: i64 = expiry_str
            .parse()
            .map_err(|_| RedecorError::Unauthenticated("malformed token expiry".into()))?;
        if expiry <= Utc::now().timestamp() {
            return Err(RedecorError::Unauthenticated("token expired".into()));
        }

        let user_bytes = hex::decode(user_hex)
            .map_err(|_| RedecorError::Unauthenticated("malformed token subject".into()))?;
        let user = String::from_utf8(user_bytes)
            .map_err(|_| RedecorError::Unauthenticated("malformed token subject".into()))?;
        if user.is_empty() {
            return Err(RedecorError::Unauthenticated("empty token subject".into()));
        }

        Ok(UserId(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (TokenSigner, TokenVerifier) {
        let signer = TokenSigner::generate();
        let verifier = TokenVerifier::from_hex(&signer.public_hex()).unwrap();
        (signer, verifier)
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let (signer, verifier) = pair();
        let token = signer.issue(&UserId("alice".into()), 3600);
        let user = verifier.verify_token(&token).unwrap();
        assert_eq!(user, UserId("alice".into()));
    }

    #[test]
    fn expired_token_is_rejected() {
        let (signer, verifier) = pair();
        let expiry = Utc::now().timestamp() - 10;
        let token = signer.issue_with_expiry(&UserId("alice".into()), expiry);
        let err = verifier.verify_token(&token).unwrap_err();
        assert!(matches!(err, RedecorError::Unauthenticated(msg) if msg.contains("expired")));
    }

    #[test]
    fn tampered_subject_is_rejected() {
        let (signer, verifier) = pair();
        let token = signer.issue(&UserId("alice".into()), 3600);
        let mut segments: Vec<String> =
            token.split('.').map(|s| s.to_string()).collect();
        segments[0] = hex::encode(b"mallory");
        let forged = segments.join(".");
        assert!(verifier.verify_token(&forged).is_err());
    }

    #[test]
    fn tampered_expiry_is_rejected() {
        let (signer, verifier) = pair();
        let token = signer.issue_with_expiry(&UserId("alice".into()), Utc::now().timestamp() - 10);
        let mut segments: Vec<String> =
            token.split('.').map(|s| s.to_string()).collect();
        // Push the expiry into the future without re-signing.
        segments[1] = (Utc::now().timestamp() + 3600).to_string();
        let forged = segments.join(".");
        assert!(verifier.verify_token(&forged).is_err());
    }

    #[test]
    fn token_from_wrong_key_is_rejected() {
        let (signer, _) = pair();
        let (_, other_verifier) = pair();
        let token = signer.issue(&UserId("alice".into()), 3600);
        assert!(other_verifier.verify_token(&token).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let (_, verifier) = pair();
        for garbage in ["", "abc", "a.b", "a.b.c.d", "zz.zz.zz"] {
            assert!(
                verifier.verify_token(garbage).is_err(),
                "token {garbage:?} should be rejected"
            );
        }
    }

    #[test]
    fn signer_hex_round_trip() {
        let signer = TokenSigner::generate();
        let restored = TokenSigner::from_hex(&signer.private_hex()).unwrap();
        assert_eq!(signer.public_hex(), restored.public_hex());
    }

    #[test]
    fn verifier_rejects_bad_trust_anchor() {
        assert!(TokenVerifier::from_hex("not hex").is_err());
        assert!(TokenVerifier::from_hex("abcd").is_err());
    }
}
