// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite credit ledger.
//!
//! All balance arithmetic happens inside single SQL statements so that
//! concurrent requests serialize through the database, never through state
//! held in the handler. The debit is conditional (`balance >= 1`) and the
//! rollback credit is an unconditional increment; neither ever writes an
//! absolute remembered value.

use std::str::FromStr;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use redecor_core::{CreditAccount, CreditLedger, RedecorError, Role, UserId};

use crate::migrations::run_migrations;

/// Convert a tokio-rusqlite error into RedecorError::Ledger.
fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> RedecorError {
    RedecorError::Ledger {
        source: Box::new(e),
    }
}

/// Persistent credit ledger backed by SQLite.
///
/// All operations go through the single tokio-rusqlite background thread.
pub struct SqliteLedger {
    conn: tokio_rusqlite::Connection,
    initial_balance: i64,
}

impl SqliteLedger {
    /// Open (or create) a ledger at the given database path and run
    /// migrations.
    ///
    /// `initial_balance` is granted to an account the first time its user is
    /// seen by [`CreditLedger::account`].
    pub async fn open(path: &str, initial_balance: i64) -> Result<Self, RedecorError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_tr_err)?;
        Self::initialize(conn, initial_balance).await
    }

    /// Open an in-memory ledger (tests and local experiments).
    pub async fn open_in_memory(initial_balance: i64) -> Result<Self, RedecorError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(map_tr_err)?;
        Self::initialize(conn, initial_balance).await
    }

    async fn initialize(
        conn: tokio_rusqlite::Connection,
        initial_balance: i64,
    ) -> Result<Self, RedecorError> {
        conn.call(run_migrations)
            .await
            .map_err(|e| RedecorError::Ledger {
                source: Box::new(e),
            })?;
        Ok(Self {
            conn,
            initial_balance,
        })
    }

    /// Add `amount` credits to a user's balance, provisioning an empty
    /// account if the user is new. Operator surface, not part of the
    /// request path. Returns the new balance.
    pub async fn grant(&self, user: &UserId, amount: i64) -> Result<i64, RedecorError> {
        let user_id = user.0.clone();
        let balance = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO credit_accounts (user_id, balance) VALUES (?1, 0)",
                    rusqlite::params![user_id],
                )?;
                conn.execute(
                    "UPDATE credit_accounts SET balance = balance + ?2, \
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
                     WHERE user_id = ?1",
                    rusqlite::params![user_id, amount],
                )?;
                conn.query_row(
                    "SELECT balance FROM credit_accounts WHERE user_id = ?1",
                    rusqlite::params![user_id],
                    |row| row.get::<_, i64>(0),
                )
            })
            .await
            .map_err(map_tr_err)?;

        info!(user = %user, amount, balance, "credits granted");
        Ok(balance)
    }

    /// Change a user's role, provisioning an empty account if the user is
    /// new. Operator surface.
    pub async fn set_role(&self, user: &UserId, role: Role) -> Result<(), RedecorError> {
        let user_id = user.0.clone();
        let role_str = role.to_string();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO credit_accounts (user_id, balance) VALUES (?1, 0)",
                    rusqlite::params![user_id],
                )?;
                conn.execute(
                    "UPDATE credit_accounts SET role = ?2, \
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
                     WHERE user_id = ?1",
                    rusqlite::params![user_id, role_str],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        info!(user = %user, role = %role, "role updated");
        Ok(())
    }
}

#[async_trait]
impl CreditLedger for SqliteLedger {
    async fn account(&self, user: &UserId) -> Result<CreditAccount, RedecorError> {
        let user_id = user.0.clone();
        let initial = self.initial_balance;
        let (provisioned, balance, role) = self
            .conn
            .call(move |conn| {
                let inserted = conn.execute(
                    "INSERT OR IGNORE INTO credit_accounts (user_id, balance) VALUES (?1, ?2)",
                    rusqlite::params![user_id, initial],
                )?;
                let (balance, role) = conn.query_row(
                    "SELECT balance, role FROM credit_accounts WHERE user_id = ?1",
                    rusqlite::params![user_id],
                    |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
                )?;
                Ok((inserted == 1, balance, role))
            })
            .await
            .map_err(map_tr_err)?;

        if provisioned {
            info!(user = %user, balance, "credit account provisioned");
        }

        let role = Role::from_str(&role).map_err(|_| {
            RedecorError::Internal(format!("unrecognized role `{role}` in ledger"))
        })?;
        Ok(CreditAccount { balance, role })
    }

    async fn debit_one(&self, user: &UserId) -> Result<bool, RedecorError> {
        let user_id = user.0.clone();
        let changed = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE credit_accounts SET balance = balance - 1, \
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
                     WHERE user_id = ?1 AND balance >= 1",
                    rusqlite::params![user_id],
                )
            })
            .await
            .map_err(map_tr_err)?;

        if changed == 1 {
            debug!(user = %user, "credit debited");
            Ok(true)
        } else {
            warn!(user = %user, "debit refused, balance insufficient");
            Ok(false)
        }
    }

    async fn credit_one(&self, user: &UserId) -> Result<(), RedecorError> {
        let user_id = user.0.clone();
        let changed = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE credit_accounts SET balance = balance + 1, \
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
                     WHERE user_id = ?1",
                    rusqlite::params![user_id],
                )
            })
            .await
            .map_err(map_tr_err)?;

        if changed == 0 {
            return Err(RedecorError::Internal(format!(
                "credit restore for unknown user `{user}`"
            )));
        }
        debug!(user = %user, "credit restored");
        Ok(())
    }
}
