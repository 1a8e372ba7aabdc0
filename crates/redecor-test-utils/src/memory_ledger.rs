// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory credit ledger fake with call recording.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use redecor_core::{CreditAccount, CreditLedger, RedecorError, Role, UserId};

fn store_failure() -> RedecorError {
    RedecorError::Ledger {
        source: Box::new(std::io::Error::other("scripted ledger failure")),
    }
}

/// A [`CreditLedger`] backed by a mutex-held map.
///
/// Debit semantics match the real ledger: the check-and-decrement happens
/// under one lock acquisition, so concurrent requests race exactly the way
/// they do against SQLite. Counters record how often each operation ran,
/// and the `fail_*` switches script store failures.
#[derive(Default)]
pub struct MemoryLedger {
    accounts: Mutex<HashMap<String, (i64, Role)>>,
    initial_balance: i64,
    account_calls: AtomicUsize,
    debit_calls: AtomicUsize,
    credit_calls: AtomicUsize,
    fail_debit: AtomicBool,
    fail_credit: AtomicBool,
}

impl MemoryLedger {
    /// Create an empty ledger; unseen users provision with balance 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account before the test runs.
    pub async fn with_account(self, user: &str, balance: i64, role: Role) -> Self {
        self.accounts
            .lock()
            .await
            .insert(user.to_string(), (balance, role));
        self
    }

    /// Read a balance directly (test assertions).
    pub async fn balance(&self, user: &str) -> i64 {
        self.accounts
            .lock()
            .await
            .get(user)
            .map(|(balance, _)| *balance)
            .unwrap_or_default()
    }

    /// Number of `account` calls observed.
    pub fn account_calls(&self) -> usize {
        self.account_calls.load(Ordering::SeqCst)
    }

    /// Number of `debit_one` calls observed.
    pub fn debit_calls(&self) -> usize {
        self.debit_calls.load(Ordering::SeqCst)
    }

    /// Number of `credit_one` calls observed.
    pub fn credit_calls(&self) -> usize {
        self.credit_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent `debit_one` calls fail.
    pub fn fail_debits(&self) {
        self.fail_debit.store(true, Ordering::SeqCst);
    }

    /// Make subsequent `credit_one` calls fail.
    pub fn fail_credits(&self) {
        self.fail_credit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CreditLedger for MemoryLedger {
    async fn account(&self, user: &UserId) -> Result<CreditAccount, RedecorError> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        let mut accounts = self.accounts.lock().await;
        let (balance, role) = accounts
            .entry(user.0.clone())
            .or_insert((self.initial_balance, Role::Normal));
        Ok(CreditAccount {
            balance: *balance,
            role: *role,
        })
    }

    async fn debit_one(&self, user: &UserId) -> Result<bool, RedecorError> {
        self.debit_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_debit.load(Ordering::SeqCst) {
            return Err(store_failure());
        }
        let mut accounts = self.accounts.lock().await;
        match accounts.get_mut(&user.0) {
            Some((balance, _)) if *balance >= 1 => {
                *balance -= 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn credit_one(&self, user: &UserId) -> Result<(), RedecorError> {
        self.credit_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_credit.load(Ordering::SeqCst) {
            return Err(store_failure());
        }
        let mut accounts = self.accounts.lock().await;
        match accounts.get_mut(&user.0) {
            Some((balance, _)) => {
                *balance += 1;
                Ok(())
            }
            None => Err(RedecorError::Internal(format!(
                "credit restore for unknown user `{user}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId(id.to_string())
    }

    #[tokio::test]
    async fn debit_is_conditional_and_counted() {
        let ledger = MemoryLedger::new()
            .with_account("alice", 1, Role::Normal)
            .await;

        assert!(ledger.debit_one(&user("alice")).await.unwrap());
        assert!(!ledger.debit_one(&user("alice")).await.unwrap());
        assert_eq!(ledger.debit_calls(), 2);
        assert_eq!(ledger.balance("alice").await, 0);
    }

    #[tokio::test]
    async fn credit_increments() {
        let ledger = MemoryLedger::new()
            .with_account("alice", 0, Role::Normal)
            .await;
        ledger.credit_one(&user("alice")).await.unwrap();
        assert_eq!(ledger.balance("alice").await, 1);
    }

    #[tokio::test]
    async fn scripted_failures_fire() {
        let ledger = MemoryLedger::new()
            .with_account("alice", 5, Role::Normal)
            .await;
        ledger.fail_debits();
        assert!(ledger.debit_one(&user("alice")).await.is_err());
        ledger.fail_credits();
        assert!(ledger.credit_one(&user("alice")).await.is_err());
    }
}
