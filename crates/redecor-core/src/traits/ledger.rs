// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credit ledger trait for per-user balance accounting.

use async_trait::async_trait;

use crate::error::RedecorError;
use crate::types::{CreditAccount, UserId};

/// Per-user credit balance store.
///
/// The ledger is the sole arbiter of concurrency for balances: both
/// operations below must be atomic on the store's side. Callers never
/// read-modify-write a balance across separate calls, and rollback is
/// always an increment, never a "set to remembered value".
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Reads the caller's account, provisioning one on first sight.
    async fn account(&self, user: &UserId) -> Result<CreditAccount, RedecorError>;

    /// Decrements the balance by 1 iff it is currently >= 1.
    ///
    /// Returns `Ok(true)` when a credit was reserved, `Ok(false)` when the
    /// balance was insufficient (e.g. a concurrent request took the last
    /// credit), and `Err` on store failure.
    async fn debit_one(&self, user: &UserId) -> Result<bool, RedecorError>;

    /// Increments the balance by 1 unconditionally. Used to roll back a
    /// reservation when the synthesis call does not yield a usable image.
    async fn credit_one(&self, user: &UserId) -> Result<(), RedecorError>;
}
