//! # profilectl CLI Module
//!
//! This module implements the CLI interface for profilectl.
//!
//! ## Available Commands
//!
//! - `classify` - Flatten a stored profile into sorted records
//! - `sort` - Put a record list into canonical order
//! - `form` - Lift the avatar out of a record list
//! - `unform` - Turn an edit form back into records
//! - `options` - Fold records into an update payload
//! - `diff` - Compute the change set between two record lists
//! - `plan` - Diff two states and fold the result into an update payload

mod commands;

use clap::{Parser, Subcommand};
use profile_core::{ClassificationTables, ProfileError};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// profilectl - profile record reconciliation
///
/// Reads JSON documents, runs one stage of the reconciliation pipeline and
/// prints the result as JSON on stdout.
#[derive(Parser, Debug)]
#[command(name = "profilectl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (when RUST_LOG is unset)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors (when RUST_LOG is unset)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// TOML file with additions to the classification tables
    #[arg(short = 'T', long, global = true, env = "PROFILECTL_TABLES")]
    pub tables: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten a stored profile into sorted records
    Classify {
        /// Path to the profile JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Put a record list into canonical order
    Sort {
        /// Path to the records JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Convert a record list into an edit form
    Form {
        /// Path to the records JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Convert an edit form into a record list
    Unform {
        /// Path to the edit form JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Fold a record list into an update payload
    Options {
        /// Path to the records JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Ask the submitter to wipe records the payload does not mention
        #[arg(long)]
        clear: bool,
    },

    /// Compute the change set between two record lists
    Diff {
        /// Current records
        #[arg(short, long)]
        current: PathBuf,

        /// Previous records (empty when omitted)
        #[arg(short, long)]
        previous: Option<PathBuf>,
    },

    /// Compute the update payload that moves previous to current
    Plan {
        /// Current records (or edit form with --form)
        #[arg(short, long)]
        current: PathBuf,

        /// Previous records (empty when omitted)
        #[arg(short, long)]
        previous: Option<PathBuf>,

        /// Read `current` as an edit form
        #[arg(long)]
        form: bool,

        /// Ask the submitter to wipe records the payload does not mention
        #[arg(long)]
        clear: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Run the selected command and return its JSON output.
pub fn run(
    command: &Commands,
    tables: &ClassificationTables,
) -> Result<serde_json::Value, ProfileError> {
    match command {
        Commands::Classify { file } => cmd_classify(file, tables),
        Commands::Sort { file } => cmd_sort(file, tables),
        Commands::Form { file } => cmd_form(file),
        Commands::Unform { file } => cmd_unform(file),
        Commands::Options { file, clear } => cmd_options(file, *clear),
        Commands::Diff { current, previous } => cmd_diff(current, previous.as_deref()),
        Commands::Plan {
            current,
            previous,
            form,
            clear,
        } => cmd_plan(current, previous.as_deref(), *form, *clear),
    }
}

/// Execute the CLI with parsed arguments, printing the result to stdout.
pub fn execute(cli: Cli) -> Result<(), ProfileError> {
    let tables = crate::config::load_tables(cli.tables.as_deref())?;
    let output = run(&cli.command, &tables)?;
    println!("{}", render(&output, cli.pretty)?);
    Ok(())
}
