// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits implemented by the external-facing adapter crates.
//!
//! The decoration request handler is written against these three seams so
//! identity, ledger, and synthesis providers are interchangeable and tests
//! can substitute fakes.

pub mod identity;
pub mod ledger;
pub mod synthesis;

pub use identity::IdentityVerifier;
pub use ledger::CreditLedger;
pub use synthesis::SynthesisClient;
