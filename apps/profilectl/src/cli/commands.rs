//! # CLI Command Implementations
//!
//! Each command reads its input documents, runs one transformation and
//! returns the JSON value to print. Input is validated at this boundary; the
//! core transformations themselves never fail.

use profile_core::{
    ClassificationTables, ProfileEditorForm, ProfileError, Record, SourceProfile, UriContentHash,
    get_profile_records_diff, plan_update, plan_update_from_form,
    primitives::{MAX_KEY_LENGTH, MAX_RECORDS, MAX_VALUE_LENGTH},
    profile_editor_form_to_profile_records, profile_records_to_profile_editor_form,
    profile_records_to_record_options, profile_to_profile_records_with, sort_profile_records,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum input document size (10 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
pub const MAX_INPUT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ProfileError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ProfileError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ProfileError::InvalidInput(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path to a canonical regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, ProfileError> {
    let canonical = path.canonicalize().map_err(|e| {
        ProfileError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ProfileError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read and parse a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ProfileError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_INPUT_FILE_SIZE)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| ProfileError::IoError(format!("Read file: {}", e)))?;

    tracing::debug!(path = %validated_path.display(), bytes = contents.len(), "read input document");

    serde_json::from_slice(&contents).map_err(|e| {
        ProfileError::DeserializationError(format!("{}: {}", path.display(), e))
    })
}

/// Serialize a command result.
fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, ProfileError> {
    serde_json::to_value(value).map_err(|e| ProfileError::SerializationError(e.to_string()))
}

/// Render a JSON value for stdout.
pub fn render(value: &serde_json::Value, pretty: bool) -> Result<String, ProfileError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| ProfileError::SerializationError(e.to_string()))
}

// =============================================================================
// INPUT VALIDATION
// =============================================================================

fn validate_field(kind: &str, key: &str, value: &str) -> Result<(), ProfileError> {
    if key.len() > MAX_KEY_LENGTH {
        return Err(ProfileError::InvalidInput(format!(
            "{} key length {} exceeds maximum {} bytes",
            kind,
            key.len(),
            MAX_KEY_LENGTH
        )));
    }
    if value.len() > MAX_VALUE_LENGTH {
        return Err(ProfileError::InvalidInput(format!(
            "{} '{}' value length {} exceeds maximum {} bytes",
            kind,
            key,
            value.len(),
            MAX_VALUE_LENGTH
        )));
    }
    Ok(())
}

fn validate_count(kind: &str, count: usize) -> Result<(), ProfileError> {
    if count > MAX_RECORDS {
        return Err(ProfileError::InvalidInput(format!(
            "{} count {} exceeds maximum allowed {}",
            kind, count, MAX_RECORDS
        )));
    }
    Ok(())
}

/// Check a record list against the boundary limits.
pub fn validate_records(records: &[Record]) -> Result<(), ProfileError> {
    validate_count("Record", records.len())?;
    for record in records {
        validate_field("Record", &record.key, &record.value)?;
    }
    Ok(())
}

/// Check a stored profile against the boundary limits.
pub fn validate_profile(profile: &SourceProfile) -> Result<(), ProfileError> {
    validate_count("Text entry", profile.texts.len())?;
    validate_count("Coin entry", profile.coins.len())?;
    for entry in &profile.texts {
        validate_field("Text entry", &entry.key, &entry.value)?;
    }
    for entry in &profile.coins {
        validate_field("Coin entry", &entry.name, &entry.value)?;
    }
    if let Some(hash) = &profile.content_hash {
        validate_field("Content hash", "contenthash", hash)?;
    }
    Ok(())
}

fn read_records(path: &Path) -> Result<Vec<Record>, ProfileError> {
    let records: Vec<Record> = read_json(path)?;
    validate_records(&records)?;
    Ok(records)
}

fn read_form(path: &Path) -> Result<ProfileEditorForm, ProfileError> {
    let form: ProfileEditorForm = read_json(path)?;
    validate_records(&form.records)?;
    validate_field("Avatar", "avatar", &form.avatar)?;
    Ok(form)
}

fn read_previous(path: Option<&Path>) -> Result<Vec<Record>, ProfileError> {
    path.map(read_records).transpose().map(Option::unwrap_or_default)
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Classify a stored profile.
pub fn cmd_classify(
    file: &Path,
    tables: &ClassificationTables,
) -> Result<serde_json::Value, ProfileError> {
    let profile: SourceProfile = read_json(file)?;
    validate_profile(&profile)?;

    let records = profile_to_profile_records_with(Some(&profile), tables, &UriContentHash);
    tracing::info!(records = records.len(), "classified profile");
    to_json(&records)
}

/// Sort a record list into canonical order.
pub fn cmd_sort(
    file: &Path,
    tables: &ClassificationTables,
) -> Result<serde_json::Value, ProfileError> {
    let records = read_records(file)?;
    to_json(&sort_profile_records(records, tables))
}

/// Record list to edit form.
pub fn cmd_form(file: &Path) -> Result<serde_json::Value, ProfileError> {
    let records = read_records(file)?;
    to_json(&profile_records_to_profile_editor_form(&records))
}

/// Edit form to record list.
pub fn cmd_unform(file: &Path) -> Result<serde_json::Value, ProfileError> {
    let form = read_form(file)?;
    to_json(&profile_editor_form_to_profile_records(&form))
}

/// Fold a record list into an update payload.
pub fn cmd_options(file: &Path, clear: bool) -> Result<serde_json::Value, ProfileError> {
    let records = read_records(file)?;
    to_json(&profile_records_to_record_options(Some(records.as_slice()), clear))
}

/// Change set between two record lists.
pub fn cmd_diff(
    current: &Path,
    previous: Option<&Path>,
) -> Result<serde_json::Value, ProfileError> {
    let current = read_records(current)?;
    let previous = read_previous(previous)?;

    let diff = get_profile_records_diff(&current, Some(previous.as_slice()));
    tracing::info!(changes = diff.len(), "computed change set");
    to_json(&diff)
}

/// Update payload moving `previous` to `current`.
pub fn cmd_plan(
    current: &Path,
    previous: Option<&Path>,
    form: bool,
    clear: bool,
) -> Result<serde_json::Value, ProfileError> {
    let previous = read_previous(previous)?;

    let options = if form {
        let form = read_form(current)?;
        plan_update_from_form(&form, Some(previous.as_slice()), clear)
    } else {
        let current = read_records(current)?;
        plan_update(&current, Some(previous.as_slice()), clear)
    };

    if options.is_empty() {
        tracing::info!("no changes to submit");
    }
    to_json(&options)
}
