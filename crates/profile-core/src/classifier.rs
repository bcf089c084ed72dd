//! # Classifier
//!
//! Flattens a stored profile into the uniform [`Record`] list and puts it in
//! canonical display order.
//!
//! - Text entries become `text` records grouped by the key tables
//! - Coin entries become `addr` records in the address group
//! - A decodable content hash becomes one `contenthash` record in the website group
//! - A non-empty binary interface descriptor becomes one `abi` record in the other group

use crate::contenthash::{ContentHashDecoder, UriContentHash, decode_content_hash};
use crate::primitives::ABI_KEY;
use crate::tables::ClassificationTables;
use crate::{Record, RecordGroup, RecordType, SourceProfile};
use serde_json::Value as JsonValue;

/// Classify a profile with the built-in tables and the URI content-hash decoder.
///
/// A missing profile yields an empty list.
#[must_use]
pub fn profile_to_profile_records(profile: Option<&SourceProfile>) -> Vec<Record> {
    profile_to_profile_records_with(profile, &ClassificationTables::default(), &UriContentHash)
}

/// Classify a profile with explicit tables and decoder.
#[must_use]
pub fn profile_to_profile_records_with<D>(
    profile: Option<&SourceProfile>,
    tables: &ClassificationTables,
    decoder: &D,
) -> Vec<Record>
where
    D: ContentHashDecoder + ?Sized,
{
    let Some(profile) = profile else {
        return Vec::new();
    };

    let texts = profile
        .texts
        .iter()
        .map(|entry| Record::text(&entry.key, tables.classify_text_key(&entry.key), &entry.value));

    let coins = profile.coins.iter().map(|entry| {
        Record::new(&entry.name, RecordType::Addr, RecordGroup::Address, &entry.value)
    });

    let website = profile
        .content_hash
        .as_deref()
        .and_then(|encoded| {
            let decoded = decode_content_hash(decoder, encoded);
            if decoded.is_none() && !encoded.is_empty() {
                tracing::debug!(len = encoded.len(), "content hash not decodable, skipped");
            }
            decoded
        })
        .map(|(key, uri)| Record::new(key, RecordType::Contenthash, RecordGroup::Website, uri));

    let abi = profile
        .abi
        .as_ref()
        .and_then(|entry| entry.abi.as_ref())
        .filter(|descriptor| !is_empty_descriptor(descriptor))
        .map(|descriptor| {
            Record::new(ABI_KEY, RecordType::Abi, RecordGroup::Other, descriptor.to_string())
        });

    let records: Vec<Record> = texts.chain(coins).chain(website).chain(abi).collect();
    sort_profile_records(records, tables)
}

/// Put records into canonical display order.
///
/// The order is by rank only; records of equal rank keep their input order.
#[must_use]
pub fn sort_profile_records(mut records: Vec<Record>, tables: &ClassificationTables) -> Vec<Record> {
    records.sort_by_cached_key(|record| tables.rank(record.group, &record.key));
    records
}

fn is_empty_descriptor(descriptor: &JsonValue) -> bool {
    match descriptor {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(fields) => fields.is_empty(),
        JsonValue::Bool(_) | JsonValue::Number(_) => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================
