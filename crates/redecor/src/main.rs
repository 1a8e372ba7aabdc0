// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! redecor - credit-gated room redecoration service.
//!
//! This is the binary entry point: it loads and validates configuration,
//! then dispatches to the serve loop or one of the operator subcommands.

use clap::{Parser, Subcommand};

mod credits;
mod keys;
mod serve;

/// Credit-gated room redecoration service.
#[derive(Parser, Debug)]
#[command(name = "redecor", version, about, long_about = None)]
struct Cli {
    /// Path to a redecor.toml (defaults to the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the redecor HTTP service.
    Serve,
    /// Inspect and provision credit balances.
    Credits {
        #[command(subcommand)]
        action: credits::CreditsAction,
    },
    /// Generate a signing key / trust anchor pair for bearer tokens.
    Keygen,
    /// Mint a signed bearer token for a user.
    Token {
        /// User id to embed in the token.
        user: String,
        /// Token lifetime in seconds.
        #[arg(long, default_value_t = 3600)]
        ttl_secs: i64,
        /// Hex-encoded Ed25519 signing key (from `redecor keygen`).
        #[arg(long, env = "REDECOR_SIGNING_KEY")]
        signing_key: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            redecor_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Credits { action } => credits::run(&config, action).await,
        Commands::Keygen => keys::run_keygen(),
        Commands::Token {
            user,
            ttl_secs,
            signing_key,
        } => keys::run_token(&user, ttl_secs, &signing_key),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<redecor_config::RedecorConfig, Vec<redecor_config::ConfigError>> {
    match path {
        Some(path) => redecor_config::load_and_validate_path(path),
        None => redecor_config::load_and_validate(),
    }
}
