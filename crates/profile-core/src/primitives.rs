//! # Innate Primitives
//!
//! Hardcoded constants for the reconciliation engine.
//!
//! These are compiled into the binary and are immutable at runtime. The
//! classification tables in [`crate::tables`] are configurable; the values
//! below are not.

use crate::RecordGroup;

/// The one key with its own merge rule and its own slot in the edit form.
pub const AVATAR_KEY: &str = "avatar";

/// Content type tag written for binary interface records (JSON encoding).
pub const ABI_CONTENT_TYPE: u32 = 1;

/// Record key used for the binary interface record produced by the classifier.
pub const ABI_KEY: &str = "abi";

/// Fallback sort rank for a key the priority table does not know.
///
/// Each default is the top of its group's rank range, so unknown keys trail
/// the known keys of the same group.
#[must_use]
pub const fn default_rank(group: RecordGroup) -> u32 {
    match group {
        RecordGroup::Media => 1,
        RecordGroup::General => 199,
        RecordGroup::Social => 299,
        RecordGroup::Address => 399,
        RecordGroup::Website => 499,
        RecordGroup::Other => 599,
        RecordGroup::Custom => 999,
    }
}

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of records (or source entries) in one input document.
///
/// Enforced at the binary boundary; the core itself accepts any length.
pub const MAX_RECORDS: usize = 1000;

/// Maximum length for record keys, in bytes.
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum length for record values (64KB).
pub const MAX_VALUE_LENGTH: usize = 65536;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ranks_follow_group_order() {
        let ranks: Vec<u32> = RecordGroup::ALL.iter().map(|g| default_rank(*g)).collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted);
    }

    #[test]
    fn media_default_rank_is_one() {
        assert_eq!(default_rank(RecordGroup::Media), 1);
        assert_eq!(default_rank(RecordGroup::Custom), 999);
    }
}
