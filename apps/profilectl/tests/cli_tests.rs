//! Integration tests for the profilectl commands.
//!
//! Commands are run against temporary JSON documents; output is checked on
//! its wire shape.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use clap::Parser;
use profile_core::{ClassificationTables, ProfileError, primitives::MAX_RECORDS};
use profilectl::cli::{
    Cli, Commands, cmd_classify, cmd_diff, cmd_form, cmd_options, cmd_plan, cmd_sort, cmd_unform,
    render, run,
};
use profilectl::config::load_tables;
use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Write a JSON document to a temporary file.
fn json_file(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", value).unwrap();
    file
}

fn record(key: &str, record_type: &str, group: &str, value: &str) -> Value {
    json!({"key": key, "type": record_type, "group": group, "value": value})
}

// =============================================================================
// CLASSIFY
// =============================================================================

#[test]
fn test_classify_stored_profile() {
    let profile = json_file(&json!({
        "texts": [
            {"key": "com.github", "value": "alice"},
            {"key": "avatar", "value": "ipfs://img"}
        ],
        "coins": [{"name": "eth", "value": "0xabc"}],
        "contentHash": "ipns://k51",
        "abi": {"abi": {"inputs": []}}
    }));

    let output = cmd_classify(profile.path(), &ClassificationTables::default()).unwrap();
    assert_eq!(
        output,
        json!([
            record("avatar", "text", "media", "ipfs://img"),
            record("com.github", "text", "social", "alice"),
            record("eth", "addr", "address", "0xabc"),
            record("ipns", "contenthash", "website", "ipns://k51"),
            record("abi", "abi", "other", r#"{"inputs":[]}"#),
        ])
    );
}

#[test]
fn test_classify_rejects_too_many_entries() {
    let texts: Vec<Value> = (0..=MAX_RECORDS)
        .map(|i| json!({"key": format!("k{}", i), "value": "v"}))
        .collect();
    let profile = json_file(&json!({ "texts": texts }));

    let result = cmd_classify(profile.path(), &ClassificationTables::default());
    assert!(matches!(result, Err(ProfileError::InvalidInput(_))));
}

#[test]
fn test_classify_with_tables_overlay() {
    let mut overlay = NamedTempFile::new().unwrap();
    write!(
        overlay,
        "social = [\"com.mastodon\"]\n\n[priority.social]\n\"com.mastodon\" = 199\n"
    )
    .unwrap();
    let tables = load_tables(Some(overlay.path())).unwrap();

    let profile = json_file(&json!({
        "texts": [
            {"key": "com.twitter", "value": "a"},
            {"key": "com.mastodon", "value": "b"}
        ]
    }));

    let output = cmd_classify(profile.path(), &tables).unwrap();
    assert_eq!(output[0]["key"], "com.mastodon");
    assert_eq!(output[0]["group"], "social");
    assert_eq!(output[1]["key"], "com.twitter");
}

// =============================================================================
// SORT / FORM / UNFORM
// =============================================================================

#[test]
fn test_sort_records() {
    let records = json_file(&json!([
        record("pet", "text", "custom", "cat"),
        record("eth", "addr", "address", "0x1"),
        record("name", "text", "general", "Alice"),
    ]));

    let output = cmd_sort(records.path(), &ClassificationTables::default()).unwrap();
    let keys: Vec<&str> = output
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["name", "eth", "pet"]);
}

#[test]
fn test_form_and_unform() {
    let records = json_file(&json!([
        record("avatar", "text", "media", "X"),
        record("a", "text", "general", "y"),
    ]));

    let form = cmd_form(records.path()).unwrap();
    assert_eq!(
        form,
        json!({"avatar": "X", "records": [record("a", "text", "general", "y")]})
    );

    let form_file = json_file(&form);
    let restored = cmd_unform(form_file.path()).unwrap();
    assert_eq!(
        restored,
        json!([
            record("a", "text", "general", "y"),
            record("avatar", "text", "media", "X"),
        ])
    );
}

#[test]
fn test_unform_accepts_missing_fields() {
    let form = json_file(&json!({"records": [{"key": " url ", "type": "text", "group": "general"}]}));

    let output = cmd_unform(form.path()).unwrap();
    assert_eq!(output, json!([record("url", "text", "general", "")]));
}

#[test]
fn test_unrecognized_type_tag_is_preserved() {
    let records = json_file(&json!([
        record("pubkey", "pubkey", "other", "k"),
        record("name", "text", "general", "Alice"),
    ]));

    let form = cmd_form(records.path()).unwrap();
    assert_eq!(form["records"][0], record("pubkey", "pubkey", "other", "k"));

    let sorted = cmd_sort(records.path(), &ClassificationTables::default()).unwrap();
    assert_eq!(sorted[1]["type"], "pubkey");

    let empty = json_file(&json!([]));
    let diff = cmd_diff(empty.path(), Some(records.path())).unwrap();
    assert_eq!(diff[0], record("pubkey", "pubkey", "other", ""));
}

// =============================================================================
// OPTIONS / DIFF / PLAN
// =============================================================================

#[test]
fn test_options_payload_shape() {
    let records = json_file(&json!([
        record("name", "text", "general", "a"),
        record("name", "text", "general", "b"),
        record("btc", "addr", "address", "bc1"),
        record("", "text", "custom", "dropped"),
        record("pubkey", "pubkey", "other", "ignored"),
    ]));

    let output = cmd_options(records.path(), true).unwrap();
    assert_eq!(
        output,
        json!({
            "texts": [{"key": "name", "value": "b"}],
            "coins": [{"coin": "btc", "value": "bc1"}],
            "clearRecords": true
        })
    );
}

#[test]
fn test_diff_without_previous() {
    let current = json_file(&json!([
        record("a", "text", "general", "1"),
        record("b", "text", "general", ""),
    ]));

    let output = cmd_diff(current.path(), None).unwrap();
    assert_eq!(output, json!([record("a", "text", "general", "1")]));
}

#[test]
fn test_diff_with_previous() {
    let current = json_file(&json!([record("a", "text", "general", "2")]));
    let previous = json_file(&json!([
        record("a", "text", "general", "1"),
        record("b", "text", "general", "x"),
    ]));

    let output = cmd_diff(current.path(), Some(previous.path())).unwrap();
    assert_eq!(
        output,
        json!([
            record("a", "text", "general", "2"),
            record("b", "text", "general", ""),
        ])
    );
}

#[test]
fn test_plan_from_form() {
    let form = json_file(&json!({
        "avatar": "ipfs://new",
        "records": [record("ipns", "contenthash", "website", "ipns://k51")]
    }));
    let previous = json_file(&json!([
        record("avatar", "text", "media", "ipfs://old"),
        record("ipfs", "contenthash", "website", "ipfs://bafy"),
    ]));

    let output = cmd_plan(form.path(), Some(previous.path()), true, false).unwrap();
    assert_eq!(
        output,
        json!({
            "texts": [{"key": "avatar", "value": "ipfs://new"}],
            "contentHash": "ipns://k51",
            "clearRecords": false
        })
    );
}

#[test]
fn test_plan_with_no_changes_is_empty() {
    let records = json!([record("name", "text", "general", "Alice")]);
    let current = json_file(&records);
    let previous = json_file(&records);

    let output = cmd_plan(current.path(), Some(previous.path()), false, false).unwrap();
    assert_eq!(output, json!({"clearRecords": false}));
}

// =============================================================================
// ERRORS AND DISPATCH
// =============================================================================

#[test]
fn test_malformed_json_is_deserialization_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{not json").unwrap();

    let result = cmd_form(file.path());
    assert!(matches!(result, Err(ProfileError::DeserializationError(_))));
}

#[test]
fn test_unknown_group_is_rejected() {
    let records = json_file(&json!([record("a", "text", "sidebar", "1")]));
    let result = cmd_form(records.path());
    assert!(matches!(result, Err(ProfileError::DeserializationError(_))));
}

#[test]
fn test_oversized_value_is_rejected() {
    let big = "x".repeat(profile_core::primitives::MAX_VALUE_LENGTH + 1);
    let records = json_file(&json!([record("a", "text", "general", &big)]));

    let result = cmd_options(records.path(), false);
    assert!(matches!(result, Err(ProfileError::InvalidInput(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = cmd_sort(
        std::path::Path::new("/nonexistent/records.json"),
        &ClassificationTables::default(),
    );
    assert!(matches!(result, Err(ProfileError::IoError(_))));
}

#[test]
fn test_cli_parses_and_dispatches() {
    let current = json_file(&json!([record("a", "text", "general", "1")]));
    let path = current.path().to_str().unwrap();

    let cli = Cli::try_parse_from(["profilectl", "--pretty", "diff", "-c", path]).unwrap();
    assert!(cli.pretty);
    assert!(matches!(cli.command, Commands::Diff { previous: None, .. }));

    let output = run(&cli.command, &ClassificationTables::default()).unwrap();
    let rendered = render(&output, cli.pretty).unwrap();
    assert!(rendered.contains('\n'));
    assert_eq!(serde_json::from_str::<Value>(&rendered).unwrap(), output);
}

#[test]
fn test_cli_quiet_flag() {
    let cli = Cli::try_parse_from(["profilectl", "form", "-f", "records.json", "-q"]).unwrap();
    assert!(cli.quiet);
    assert!(!cli.verbose);

    let both = Cli::try_parse_from(["profilectl", "-q", "-v", "form", "-f", "records.json"]);
    assert!(both.is_err());
}

#[test]
fn test_cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["profilectl"]).is_err());
}
