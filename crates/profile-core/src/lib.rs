//! # profile-core
//!
//! The profile record reconciliation engine - THE LOGIC.
//!
//! Converts between three representations of an identity profile and
//! computes the minimal update that moves one profile state to another:
//!
//! ```text
//! SourceProfile ──classifier──▶ Vec<Record> ◀──form──▶ ProfileEditorForm
//!                                    │
//!                                  diff (against previous records)
//!                                    ▼
//!                                Vec<Record> ──options──▶ RecordOptions
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure and synchronous: no I/O, no shared mutable state
//! - Total: the transformations never fail, malformed records are dropped
//! - Deterministic: `BTreeMap`/`BTreeSet` only, stable sorting
//! - Tables are values passed in, never globals

// =============================================================================
// MODULES
// =============================================================================

pub mod classifier;
pub mod contenthash;
pub mod diff;
pub mod form;
pub mod options;
pub mod primitives;
pub mod tables;
pub mod types;
pub mod update;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{
    AbiEntry, CoinEntry, ProfileEditorForm, ProfileError, Record, RecordGroup, RecordType,
    SourceProfile, TextEntry,
};

// =============================================================================
// RE-EXPORTS: Transformations
// =============================================================================

pub use classifier::{
    profile_to_profile_records, profile_to_profile_records_with, sort_profile_records,
};
pub use contenthash::{ContentHashDecoder, ProtocolType, UriContentHash};
pub use diff::get_profile_records_diff;
pub use form::{profile_editor_form_to_profile_records, profile_records_to_profile_editor_form};
pub use options::{
    AbiRecordOption, CoinRecordOption, RecordOptions, RecordOptionsBuilder, TextRecordOption,
    profile_records_to_record_options,
};
pub use tables::{ClassificationTables, TablesOverlay};
pub use update::{plan_update, plan_update_from_form};
