// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for redecor integration tests.
//!
//! Provides in-process fakes for the three collaborator traits so the
//! decoration handler and gateway can be exercised deterministically,
//! without a database, key material, or external API calls.

pub mod memory_ledger;
pub mod scripted_synthesis;
pub mod static_verifier;

pub use memory_ledger::MemoryLedger;
pub use scripted_synthesis::ScriptedSynthesis;
pub use static_verifier::StaticVerifier;
