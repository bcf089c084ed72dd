//! # Configuration
//!
//! Startup configuration for the binary.
//!
//! ## Environment Variables
//!
//! - `PROFILECTL_TABLES`: path to a TOML classification overlay (same as `--tables`)
//! - `PROFILECTL_LOG_FORMAT`: `json` for machine-parseable logs, anything else for text
//! - `RUST_LOG`: standard `EnvFilter` directives

use profile_core::{ClassificationTables, ProfileError, TablesOverlay};
use std::path::Path;

/// Maximum size of a tables overlay file (1 MB).
const MAX_TABLES_FILE_SIZE: u64 = 1024 * 1024;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read the format from `PROFILECTL_LOG_FORMAT`.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var("PROFILECTL_LOG_FORMAT").as_deref() {
            Ok("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Default `EnvFilter` directives when `RUST_LOG` is unset.
///
/// `verbose` wins if both flags are set; clap rejects that combination.
#[must_use]
pub fn default_log_filter(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "profilectl=debug,profile_core=debug"
    } else if quiet {
        "profilectl=warn,profile_core=warn"
    } else {
        "profilectl=info,profile_core=warn"
    }
}

/// Parse a TOML overlay document.
pub fn parse_tables_overlay(contents: &str) -> Result<TablesOverlay, ProfileError> {
    toml::from_str(contents)
        .map_err(|e| ProfileError::ConfigError(format!("Invalid tables file: {}", e)))
}

/// Build the classification tables: built-in defaults, plus the overlay file
/// when one is given.
pub fn load_tables(path: Option<&Path>) -> Result<ClassificationTables, ProfileError> {
    let mut tables = ClassificationTables::default();
    let Some(path) = path else {
        return Ok(tables);
    };

    let metadata = std::fs::metadata(path).map_err(|e| {
        ProfileError::IoError(format!("Cannot read tables file '{}': {}", path.display(), e))
    })?;
    if metadata.len() > MAX_TABLES_FILE_SIZE {
        return Err(ProfileError::ConfigError(format!(
            "Tables file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_TABLES_FILE_SIZE
        )));
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| ProfileError::IoError(format!("Read tables file: {}", e)))?;
    let overlay = parse_tables_overlay(&contents)?;
    tables.apply(&overlay)?;

    tracing::info!(
        path = %path.display(),
        general = overlay.general.len(),
        social = overlay.social.len(),
        "loaded classification tables overlay"
    );
    Ok(tables)
}
