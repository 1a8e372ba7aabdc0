// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoration request orchestration for the redecor service.
//!
//! The [`DecorationService`] is the one piece of this system with real
//! invariants: it reserves a credit before the paid synthesis call and
//! guarantees the reservation is rolled back on every failure path, so a
//! user is never charged for a generation they did not receive.

pub mod handler;
pub mod prompt;

pub use handler::DecorationService;
