//! # profilectl
//!
//! Command-line front end for the profile record reconciliation engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │               apps/profilectl (THE BINARY)          │
//! │                                                     │
//! │   JSON files ──▶ CLI (clap) ──▶ profile-core ──▶ stdout
//! │                      ▲                              │
//! │          tables.toml ┘ (config)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! profilectl classify -f profile.json
//! profilectl diff -c current.json -p previous.json
//! profilectl plan -c form.json -p previous.json --form --pretty
//! ```

use clap::Parser;
use profilectl::cli;
use profilectl::config::{LogFormat, default_log_filter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout is reserved for command output.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_log_filter(cli.verbose, cli.quiet).into());

    match LogFormat::from_env() {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
