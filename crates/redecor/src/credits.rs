// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `redecor credits` subcommands: operator inspection and provisioning of
//! credit balances. Credit acquisition by end users is out of scope; this
//! is the minimum surface a running service needs.

use std::str::FromStr;

use clap::Subcommand;

use redecor_config::RedecorConfig;
use redecor_core::{CreditLedger, RedecorError, Role, UserId};
use redecor_ledger::SqliteLedger;

/// Credit ledger operations.
#[derive(Subcommand, Debug)]
pub enum CreditsAction {
    /// Show a user's balance and role.
    Show { user: String },
    /// Add credits to a user's balance.
    Grant { user: String, amount: i64 },
    /// Change a user's role (normal or admin).
    SetRole { user: String, role: String },
}

/// Runs a `redecor credits` action against the configured ledger.
pub async fn run(config: &RedecorConfig, action: CreditsAction) -> Result<(), RedecorError> {
    let ledger = SqliteLedger::open(
        &config.storage.database_path,
        config.credits.initial_balance,
    )
    .await?;

    match action {
        CreditsAction::Show { user } => {
            let account = ledger.account(&UserId(user.clone())).await?;
            println!("user:    {user}");
            println!("balance: {}", account.balance);
            println!("role:    {}", account.role);
        }
        CreditsAction::Grant { user, amount } => {
            let balance = ledger.grant(&UserId(user.clone()), amount).await?;
            println!("user:    {user}");
            println!("balance: {balance}");
        }
        CreditsAction::SetRole { user, role } => {
            let role = Role::from_str(&role)
                .map_err(|_| RedecorError::InvalidInput(format!("unknown role `{role}`")))?;
            ledger.set_role(&UserId(user.clone()), role).await?;
            println!("user: {user}");
            println!("role: {role}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn grant_then_show_round_trips_through_the_db() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RedecorConfig::default();
        config.storage.database_path = dir
            .path()
            .join("credits.db")
            .to_str()
            .unwrap()
            .to_string();

        run(
            &config,
            CreditsAction::Grant {
                user: "alice".into(),
                amount: 7,
            },
        )
        .await
        .unwrap();

        let ledger = SqliteLedger::open(&config.storage.database_path, 0)
            .await
            .unwrap();
        let account = ledger.account(&UserId("alice".into())).await.unwrap();
        assert_eq!(account.balance, 7);
    }

    #[tokio::test]
    async fn set_role_rejects_unknown_roles() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RedecorConfig::default();
        config.storage.database_path = dir
            .path()
            .join("credits.db")
            .to_str()
            .unwrap()
            .to_string();

        let err = run(
            &config,
            CreditsAction::SetRole {
                user: "alice".into(),
                role: "superuser".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RedecorError::InvalidInput(_)));
    }
}
