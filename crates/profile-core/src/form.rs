//! # Form Normalizer
//!
//! Converts between the uniform record list and the edit form, where the
//! media avatar is a top-level field instead of a list entry.

use crate::{ProfileEditorForm, Record};

/// Materialize an edit form back into records.
///
/// Record keys are trimmed. A non-empty avatar is appended as the media
/// avatar record; an empty one appends nothing.
#[must_use]
pub fn profile_editor_form_to_profile_records(form: &ProfileEditorForm) -> Vec<Record> {
    let mut records: Vec<Record> = form
        .records
        .iter()
        .map(|record| Record {
            key: record.key.trim().to_string(),
            ..record.clone()
        })
        .collect();

    if !form.avatar.is_empty() {
        records.push(Record::avatar(&form.avatar));
    }
    records
}

/// Lift the media avatar out of a record list.
///
/// If several media avatar records are present the last one wins.
#[must_use]
pub fn profile_records_to_profile_editor_form(records: &[Record]) -> ProfileEditorForm {
    records
        .iter()
        .fold(ProfileEditorForm::default(), |mut form, record| {
            if record.is_media_avatar() {
                form.avatar.clone_from(&record.value);
            } else {
                form.records.push(record.clone());
            }
            form
        })
}
