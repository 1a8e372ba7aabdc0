// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `redecor keygen` and `redecor token` subcommands.

use redecor_auth::TokenSigner;
use redecor_core::{RedecorError, UserId};

/// Generate a fresh signing key / trust anchor pair and print both.
pub fn run_keygen() -> Result<(), RedecorError> {
    let signer = TokenSigner::generate();
    println!("signing key:  {}", signer.private_hex());
    println!("trust anchor: {}", signer.public_hex());
    println!();
    println!(
        "Set auth.trust_anchor in redecor.toml to the trust anchor; keep the \
         signing key out of the server's reach."
    );
    Ok(())
}

/// Mint a signed bearer token for the given user.
pub fn run_token(user: &str, ttl_secs: i64, signing_key: &str) -> Result<(), RedecorError> {
    if user.is_empty() {
        return Err(RedecorError::InvalidInput("user must not be empty".into()));
    }
    let signer = TokenSigner::from_hex(signing_key)?;
    let token = signer.issue(&UserId(user.to_string()), ttl_secs);
    println!("{token}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use redecor_auth::TokenVerifier;

    #[test]
    fn minted_token_verifies_against_the_printed_anchor() {
        let signer = TokenSigner::generate();
        let verifier = TokenVerifier::from_hex(&signer.public_hex()).unwrap();
        let token = signer.issue(&UserId("ops-user".into()), 60);
        assert_eq!(
            verifier.verify_token(&token).unwrap(),
            UserId("ops-user".into())
        );
    }

    #[test]
    fn token_command_rejects_empty_user() {
        let signer = TokenSigner::generate();
        assert!(run_token("", 60, &signer.private_hex()).is_err());
    }
}
