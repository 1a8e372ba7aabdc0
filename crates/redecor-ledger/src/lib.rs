// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for per-user credit balances.
//!
//! This crate implements [`redecor_core::CreditLedger`] on SQLite via
//! tokio-rusqlite, with embedded refinery migrations. It is the only durable
//! state in the system; everything else is per-request.

pub mod ledger;
pub mod migrations;

pub use ledger::SqliteLedger;
