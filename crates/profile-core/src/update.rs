//! # Update Planning
//!
//! Composes the diff engine and the options builder into the payload that
//! commits an edited profile.

use crate::diff::get_profile_records_diff;
use crate::form::profile_editor_form_to_profile_records;
use crate::options::{RecordOptions, profile_records_to_record_options};
use crate::{ProfileEditorForm, Record};

/// Payload that moves a profile from `previous` to `current`.
///
/// Only changed slots are written; removed slots are written as empty
/// values. An empty payload (see [`RecordOptions::is_empty`]) means there is
/// nothing to submit.
#[must_use]
pub fn plan_update(
    current: &[Record],
    previous: Option<&[Record]>,
    clear_records: bool,
) -> RecordOptions {
    let diff = get_profile_records_diff(current, previous);
    tracing::debug!(changed = diff.len(), clear_records, "planning profile update");
    profile_records_to_record_options(Some(diff.as_slice()), clear_records)
}

/// [`plan_update`] for an edit form.
#[must_use]
pub fn plan_update_from_form(
    form: &ProfileEditorForm,
    previous: Option<&[Record]>,
    clear_records: bool,
) -> RecordOptions {
    let current = profile_editor_form_to_profile_records(form);
    plan_update(&current, previous, clear_records)
}
