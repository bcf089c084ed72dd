//! # Property-Based Tests
//!
//! Determinism and round-trip invariants of the reconciliation engine,
//! checked with proptest.

use profile_core::{
    ClassificationTables, Record, RecordGroup, RecordType, get_profile_records_diff,
    profile_editor_form_to_profile_records, profile_records_to_profile_editor_form,
    profile_records_to_record_options, sort_profile_records,
};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::select;
use std::collections::BTreeSet;

// =============================================================================
// STRATEGIES
// =============================================================================

fn group() -> impl Strategy<Value = RecordGroup> {
    select(RecordGroup::ALL.to_vec())
}

fn record_type() -> impl Strategy<Value = RecordType> {
    select(vec![
        RecordType::Text,
        RecordType::Addr,
        RecordType::Contenthash,
        RecordType::Abi,
        RecordType::Unknown("pubkey".to_string()),
    ])
}

fn record() -> impl Strategy<Value = Record> {
    ("[a-z][a-z.]{0,8}", record_type(), group(), "[a-z0-9]{0,6}")
        .prop_map(|(key, record_type, group, value)| Record::new(key, record_type, group, value))
}

/// Records with unique `(key, group)` slots and no media avatar.
fn unique_records() -> impl Strategy<Value = Vec<Record>> {
    vec(record(), 0..20).prop_map(|records| {
        let mut seen = BTreeSet::new();
        records
            .into_iter()
            .filter(|r| !r.is_media_avatar())
            .filter(|r| seen.insert((r.key.clone(), r.group)))
            .collect()
    })
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Form conversion restores a list without avatar unchanged.
    #[test]
    fn form_round_trip_restores_records(records in unique_records()) {
        let form = profile_records_to_profile_editor_form(&records);
        prop_assert!(form.avatar.is_empty());

        let restored = profile_editor_form_to_profile_records(&form);
        prop_assert_eq!(restored, records);
    }

    /// The form never carries the media avatar inside its record list.
    #[test]
    fn form_records_exclude_media_avatar(
        records in unique_records(),
        avatar in "[a-z]{1,6}",
        position in 0usize..20
    ) {
        let mut records = records;
        let at = position.min(records.len());
        records.insert(at, Record::avatar(avatar.clone()));

        let form = profile_records_to_profile_editor_form(&records);
        prop_assert_eq!(form.avatar, avatar);
        prop_assert!(form.records.iter().all(|r| !r.is_media_avatar()));
        prop_assert_eq!(form.records.len(), records.len() - 1);
    }

    /// A list diffed against itself produces no changes.
    #[test]
    fn diff_against_self_is_empty(records in unique_records()) {
        let diff = get_profile_records_diff(&records, Some(records.as_slice()));
        prop_assert!(diff.is_empty());
    }

    /// Every record of a diff against nothing carries a value.
    #[test]
    fn diff_against_nothing_is_non_empty_current(records in unique_records()) {
        let diff = get_profile_records_diff(&records, None);
        let expected: Vec<Record> = records.into_iter().filter(|r| !r.is_empty_value()).collect();
        prop_assert_eq!(diff, expected);
    }

    /// Diffing nothing against a list tombstones every slot.
    #[test]
    fn diff_of_nothing_tombstones_previous(records in unique_records()) {
        let diff = get_profile_records_diff(&[], Some(records.as_slice()));
        prop_assert_eq!(diff.len(), records.len());
        prop_assert!(diff.iter().all(Record::is_empty_value));
    }

    /// The text bucket holds each key at most once, with its last value.
    #[test]
    fn text_fold_is_last_write_wins(
        entries in vec(("[a-z]{1,3}", "[a-z0-9]{1,4}"), 0..30)
    ) {
        let records: Vec<Record> = entries
            .iter()
            .map(|(k, v)| Record::text(k.as_str(), RecordGroup::Custom, v.as_str()))
            .collect();

        let options = profile_records_to_record_options(Some(records.as_slice()), false);

        let keys: BTreeSet<&str> = options.texts.iter().map(|t| t.key.as_str()).collect();
        prop_assert_eq!(keys.len(), options.texts.len());
        for text in &options.texts {
            let last = entries.iter().rev().find(|(k, _)| *k == text.key).map(|(_, v)| v.as_str());
            prop_assert_eq!(Some(text.value.as_str()), last);
        }
    }

    /// Sorting orders by rank and never reorders records that share a rank.
    #[test]
    fn sort_is_stable_within_rank(records in vec(record(), 0..30)) {
        let tables = ClassificationTables::default();
        let sorted = sort_profile_records(records.clone(), &tables);

        let mut indexed: Vec<(u32, usize, Record)> = records
            .into_iter()
            .enumerate()
            .map(|(i, r)| (tables.rank(r.group, &r.key), i, r))
            .collect();
        indexed.sort_by_key(|(rank, i, _)| (*rank, *i));
        let expected: Vec<Record> = indexed.into_iter().map(|(_, _, r)| r).collect();

        prop_assert_eq!(sorted, expected);
    }

    /// Sorting twice is the same as sorting once.
    #[test]
    fn sort_is_idempotent(records in vec(record(), 0..30)) {
        let tables = ClassificationTables::default();
        let once = sort_profile_records(records, &tables);
        let twice = sort_profile_records(once.clone(), &tables);
        prop_assert_eq!(once, twice);
    }
}
