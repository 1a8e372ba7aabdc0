// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the redecor service.
//!
//! This crate provides the error taxonomy, common types, and the three
//! collaborator traits (identity verifier, credit ledger, synthesis client)
//! the decoration request handler is written against. Adapter crates
//! implement the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RedecorError;
pub use traits::{CreditLedger, IdentityVerifier, SynthesisClient};
pub use types::{
    CreditAccount, Decoration, DecorationRequest, GeneratedImage, Role, SynthesisResult,
    UserId,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redecor_error_has_all_variants() {
        let _unauthenticated = RedecorError::Unauthenticated("test".into());
        let _invalid = RedecorError::InvalidInput("test".into());
        let _quota = RedecorError::QuotaExceeded;
        let _blocked = RedecorError::ContentBlocked {
            reason: "test".into(),
        };
        let _rate_limited = RedecorError::RateLimited;
        let _synthesis = RedecorError::SynthesisFailed {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _ledger = RedecorError::Ledger {
            source: Box::new(std::io::Error::other("test")),
        };
        let _timeout = RedecorError::Timeout {
            duration: std::time::Duration::from_secs(90),
        };
        let _config = RedecorError::Config("test".into());
        let _internal = RedecorError::Internal("test".into());
    }

    #[test]
    fn error_messages_do_not_leak_sources() {
        // The Display form for synthesis failures carries only the message;
        // the boxed cause is for server-side logging.
        let err = RedecorError::SynthesisFailed {
            message: "image generation failed".into(),
            source: Some(Box::new(std::io::Error::other("connection reset by peer"))),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("image generation failed"));
        assert!(!rendered.contains("connection reset"));
    }

    #[test]
    fn all_collaborator_traits_are_exported() {
        // Compile-time check that the three seams are reachable from the
        // crate root.
        fn _assert_identity<T: IdentityVerifier>() {}
        fn _assert_ledger<T: CreditLedger>() {}
        fn _assert_synthesis<T: SynthesisClient>() {}
    }
}
