//! # Diff Engine
//!
//! Computes the minimal change set between two record lists.
//!
//! The output is the changes (new or updated records, in `current` order)
//! followed by the deletions (tombstones of `previous` records, in
//! `previous` order). No sort is applied.
//!
//! ## Website Exclusivity
//!
//! A profile holds at most one website record, but its key names the
//! protocol (`ipfs`, `ipns`, ...) and changes with it. A previous website
//! record therefore survives as long as *any* current website record exists,
//! and is tombstoned only when the website group disappears entirely.

use crate::{Record, RecordGroup};
use std::collections::{BTreeMap, BTreeSet};

type Slot<'a> = (&'a str, RecordGroup);

fn slot(record: &Record) -> Slot<'_> {
    (record.key.as_str(), record.group)
}

/// Diff `current` against `previous` (empty when absent).
///
/// - Current records with an empty value never appear as changes
/// - Current records with no previous slot are emitted as new
/// - Current records whose previous value differs are emitted as updated
/// - Previous records with no current slot are emitted with an empty value
#[must_use]
pub fn get_profile_records_diff(current: &[Record], previous: Option<&[Record]>) -> Vec<Record> {
    let previous = previous.unwrap_or_default();

    // First occurrence wins, matching a front-to-back search.
    let mut previous_by_slot: BTreeMap<Slot<'_>, &Record> = BTreeMap::new();
    for record in previous {
        previous_by_slot.entry(slot(record)).or_insert(record);
    }

    let changes = current.iter().filter(|record| {
        if record.is_empty_value() {
            return false;
        }
        match previous_by_slot.get(&slot(record)) {
            None => true,
            Some(prev) => prev.value != record.value,
        }
    });

    let current_slots: BTreeSet<Slot<'_>> = current.iter().map(slot).collect();
    let has_current_website = current.iter().any(|r| r.group == RecordGroup::Website);

    let deletions = previous
        .iter()
        .filter(|record| {
            let still_present = if record.group == RecordGroup::Website {
                has_current_website
            } else {
                current_slots.contains(&slot(record))
            };
            !still_present
        })
        .map(Record::tombstone);

    let diff: Vec<Record> = changes.cloned().chain(deletions).collect();
    tracing::trace!(
        current = current.len(),
        previous = previous.len(),
        changes = diff.len(),
        "computed profile records diff"
    );
    diff
}
