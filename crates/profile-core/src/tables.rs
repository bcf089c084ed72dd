//! # Classification Tables
//!
//! Static lookup data for grouping and ordering records.
//!
//! The tables are plain values: built once (defaults, optionally merged with a
//! [`TablesOverlay`] from configuration) and passed explicitly into the
//! classifier and sort. Nothing here is global.
//!
//! ## Case Sensitivity
//!
//! Group membership (`general`, `social`) is an exact string match. Rank
//! lookups lowercase the key first. The asymmetry is deliberate and pinned by
//! tests.

use crate::primitives::{AVATAR_KEY, default_rank};
use crate::{ProfileError, RecordGroup};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

const GENERAL_KEYS: &[&str] = &[
    "name",
    "description",
    "url",
    "location",
    "email",
    "timezone",
    "keywords",
    "notice",
    "header",
];

const SOCIAL_KEYS: &[&str] = &[
    "com.twitter",
    "com.github",
    "com.discord",
    "org.telegram",
    "com.reddit",
    "xyz.farcaster",
    "com.youtube",
    "com.linkedin",
];

const MEDIA_RANKS: &[(&str, u32)] = &[(AVATAR_KEY, 0)];

const GENERAL_RANKS: &[(&str, u32)] = &[
    ("name", 100),
    ("description", 101),
    ("url", 102),
    ("location", 103),
    ("email", 104),
    ("timezone", 105),
    ("keywords", 106),
    ("notice", 107),
    ("header", 108),
];

const SOCIAL_RANKS: &[(&str, u32)] = &[
    ("com.twitter", 200),
    ("com.github", 201),
    ("com.discord", 202),
    ("org.telegram", 203),
    ("com.reddit", 204),
    ("xyz.farcaster", 205),
    ("com.youtube", 206),
    ("com.linkedin", 207),
];

const ADDRESS_RANKS: &[(&str, u32)] = &[
    ("eth", 300),
    ("btc", 301),
    ("sol", 302),
    ("ltc", 303),
    ("doge", 304),
    ("bnb", 305),
    ("op", 306),
    ("arb1", 307),
    ("base", 308),
];

const WEBSITE_RANKS: &[(&str, u32)] = &[
    ("ipfs", 400),
    ("ipns", 401),
    ("swarm", 402),
    ("onion", 403),
    ("onion3", 404),
    ("skynet", 405),
    ("arweave", 406),
];

const OTHER_RANKS: &[(&str, u32)] = &[("abi", 500)];

/// Key sets and sort priorities consulted by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTables {
    general: BTreeSet<String>,
    social: BTreeSet<String>,
    priority: BTreeMap<RecordGroup, BTreeMap<String, u32>>,
}

impl Default for ClassificationTables {
    fn default() -> Self {
        let to_set = |keys: &[&str]| -> BTreeSet<String> {
            keys.iter().map(|k| (*k).to_string()).collect()
        };
        let to_ranks = |ranks: &[(&str, u32)]| {
            ranks
                .iter()
                .map(|(k, r)| ((*k).to_string(), *r))
                .collect::<BTreeMap<_, _>>()
        };

        let mut priority = BTreeMap::new();
        priority.insert(RecordGroup::Media, to_ranks(MEDIA_RANKS));
        priority.insert(RecordGroup::General, to_ranks(GENERAL_RANKS));
        priority.insert(RecordGroup::Social, to_ranks(SOCIAL_RANKS));
        priority.insert(RecordGroup::Address, to_ranks(ADDRESS_RANKS));
        priority.insert(RecordGroup::Website, to_ranks(WEBSITE_RANKS));
        priority.insert(RecordGroup::Other, to_ranks(OTHER_RANKS));

        Self {
            general: to_set(GENERAL_KEYS),
            social: to_set(SOCIAL_KEYS),
            priority,
        }
    }
}

impl ClassificationTables {
    /// Tables with no keys and no explicit ranks.
    ///
    /// Every text key classifies as custom (except the avatar) and every
    /// record sorts by its group default rank.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            general: BTreeSet::new(),
            social: BTreeSet::new(),
            priority: BTreeMap::new(),
        }
    }

    /// Build tables from explicit key sets and priorities.
    ///
    /// Priority keys are lowercased so that rank lookups match them.
    #[must_use]
    pub fn new(
        general: impl IntoIterator<Item = String>,
        social: impl IntoIterator<Item = String>,
        priority: impl IntoIterator<Item = (RecordGroup, String, u32)>,
    ) -> Self {
        let mut tables = Self::empty();
        tables.general.extend(general);
        tables.social.extend(social);
        for (group, key, rank) in priority {
            tables.set_rank(group, &key, rank);
        }
        tables
    }

    /// Insert or replace an explicit rank.
    pub fn set_rank(&mut self, group: RecordGroup, key: &str, rank: u32) {
        self.priority
            .entry(group)
            .or_default()
            .insert(key.to_lowercase(), rank);
    }

    /// Whether `key` is a general-purpose key. Exact match.
    #[must_use]
    pub fn is_general(&self, key: &str) -> bool {
        self.general.contains(key)
    }

    /// Whether `key` is a social-platform key. Exact match.
    #[must_use]
    pub fn is_social(&self, key: &str) -> bool {
        self.social.contains(key)
    }

    /// Group for a stored text key.
    ///
    /// The avatar is always media; otherwise general, then social, then custom.
    #[must_use]
    pub fn classify_text_key(&self, key: &str) -> RecordGroup {
        if key == AVATAR_KEY {
            RecordGroup::Media
        } else if self.is_general(key) {
            RecordGroup::General
        } else if self.is_social(key) {
            RecordGroup::Social
        } else {
            RecordGroup::Custom
        }
    }

    /// Sort rank of `(group, key)`, falling back to the group default.
    #[must_use]
    pub fn rank(&self, group: RecordGroup, key: &str) -> u32 {
        self.priority
            .get(&group)
            .and_then(|ranks| ranks.get(&key.to_lowercase()))
            .copied()
            .unwrap_or_else(|| default_rank(group))
    }

    /// Merge an overlay onto these tables.
    ///
    /// Returns `ProfileError::ConfigError` when the overlay names an unknown
    /// group. On error the tables are left unchanged.
    pub fn apply(&mut self, overlay: &TablesOverlay) -> Result<(), ProfileError> {
        let mut ranks = Vec::new();
        for (group_name, entries) in &overlay.priority {
            let group: RecordGroup = group_name
                .parse()
                .map_err(|e: ProfileError| ProfileError::ConfigError(e.to_string()))?;
            ranks.extend(entries.iter().map(|(key, rank)| (group, key.as_str(), *rank)));
        }

        self.general.extend(overlay.general.iter().cloned());
        self.social.extend(overlay.social.iter().cloned());
        for (group, key, rank) in ranks {
            self.set_rank(group, key, rank);
        }
        Ok(())
    }
}

// =============================================================================
// CONFIGURATION OVERLAY
// =============================================================================

/// Additions to the built-in tables, as read from a configuration file.
///
/// ```toml
/// general = ["pronouns"]
/// social = ["com.mastodon"]
///
/// [priority.social]
/// "com.mastodon" = 208
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TablesOverlay {
    pub general: Vec<String>,
    pub social: Vec<String>,
    pub priority: BTreeMap<String, BTreeMap<String, u32>>,
}
