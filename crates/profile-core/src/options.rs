//! # Options Builder
//!
//! Folds a record list into the grouped update payload submitted to the
//! resolver: one bucket per protocol primitive.
//!
//! ## Merge Rules
//!
//! - Empty keys are skipped
//! - `avatar` (any type) follows the avatar precedence rule, see [`RecordOptionsBuilder::push`]
//! - `text`: upsert by key, last value wins, ordered by last occurrence
//! - `addr`: upsert by coin, last value wins, ordered by last occurrence
//! - `contenthash`: single slot, last wins
//! - `abi`: single slot, last wins, hex-encoded with content type 1
//! - unknown types are ignored
//!
//! The fold never fails. Skipped records are reported at `debug` level only.

use crate::primitives::{ABI_CONTENT_TYPE, AVATAR_KEY};
use crate::{Record, RecordGroup, RecordType};
use serde::{Deserialize, Serialize};

// =============================================================================
// UPDATE PAYLOAD
// =============================================================================

/// A text record write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecordOption {
    pub key: String,
    pub value: String,
}

/// A coin address write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRecordOption {
    pub coin: String,
    pub value: String,
}

/// A binary interface write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiRecordOption {
    pub content_type: u32,
    pub encoded_data: String,
}

/// The wire-format update payload.
///
/// `clear_records` asks the submitter to wipe records this payload does not
/// mention instead of leaving them untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub texts: Vec<TextRecordOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coins: Vec<CoinRecordOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<AbiRecordOption>,
    #[serde(default)]
    pub clear_records: bool,
}

impl RecordOptions {
    /// Whether no bucket holds a write.
    ///
    /// `clear_records` is not a write and does not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
            && self.coins.is_empty()
            && self.content_hash.is_none()
            && self.abi.is_none()
    }

    /// The accumulated value of a text key, if any.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// The accumulated address of a coin, if any.
    #[must_use]
    pub fn coin(&self, coin: &str) -> Option<&str> {
        self.coins
            .iter()
            .find(|entry| entry.coin == coin)
            .map(|entry| entry.value.as_str())
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Incremental fold of records into a [`RecordOptions`].
///
/// A builder may be seeded with a payload from an earlier fold, which is
/// where the avatar precedence rule becomes observable.
#[derive(Debug, Clone, Default)]
pub struct RecordOptionsBuilder {
    options: RecordOptions,
}

impl RecordOptionsBuilder {
    /// Start an empty fold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume folding on top of an existing payload.
    #[must_use]
    pub fn from_options(options: RecordOptions) -> Self {
        Self { options }
    }

    /// Fold one record.
    ///
    /// Avatar precedence: the incoming value replaces an already accumulated
    /// avatar only when it is a non-empty media record. Otherwise a
    /// non-empty accumulated avatar is kept, and failing that the incoming
    /// value is taken as is.
    pub fn push(&mut self, record: &Record) -> &mut Self {
        if record.key.is_empty() {
            tracing::debug!(
                record_type = %record.record_type,
                "skipping record with empty key"
            );
            return self;
        }

        if record.key == AVATAR_KEY {
            let existing = self.options.text(AVATAR_KEY).filter(|v| !v.is_empty());
            let value = match existing {
                Some(_) if record.group == RecordGroup::Media && !record.value.is_empty() => {
                    record.value.clone()
                }
                Some(current) => current.to_string(),
                None => record.value.clone(),
            };
            upsert_text(&mut self.options.texts, AVATAR_KEY, value);
            return self;
        }

        match &record.record_type {
            RecordType::Text => {
                upsert_text(&mut self.options.texts, &record.key, record.value.clone());
            }
            RecordType::Addr => {
                upsert_coin(&mut self.options.coins, &record.key, record.value.clone());
            }
            RecordType::Contenthash => {
                self.options.content_hash = Some(record.value.clone());
            }
            RecordType::Abi => {
                self.options.abi = Some(AbiRecordOption {
                    content_type: ABI_CONTENT_TYPE,
                    encoded_data: encode_abi(&record.value),
                });
            }
            RecordType::Unknown(tag) => {
                tracing::debug!(key = %record.key, tag = %tag, "ignoring record of unknown type");
            }
        }
        self
    }

    /// Fold a sequence of records in order.
    pub fn extend<'a, I>(&mut self, records: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        for record in records {
            self.push(record);
        }
        self
    }

    /// Finish the fold.
    #[must_use]
    pub fn build(self, clear_records: bool) -> RecordOptions {
        RecordOptions {
            clear_records,
            ..self.options
        }
    }
}

/// Fold a record list into an update payload.
#[must_use]
pub fn profile_records_to_record_options(
    records: Option<&[Record]>,
    clear_records: bool,
) -> RecordOptions {
    let mut builder = RecordOptionsBuilder::new();
    builder.extend(records.unwrap_or_default());
    builder.build(clear_records)
}

/// Hex-encode an ABI value for the resolver (`0x` prefixed).
#[must_use]
pub fn encode_abi(value: &str) -> String {
    format!("0x{}", hex::encode(value.as_bytes()))
}

fn upsert_text(texts: &mut Vec<TextRecordOption>, key: &str, value: String) {
    texts.retain(|entry| entry.key != key);
    texts.push(TextRecordOption {
        key: key.to_string(),
        value,
    });
}

fn upsert_coin(coins: &mut Vec<CoinRecordOption>, coin: &str, value: String) {
    coins.retain(|entry| entry.coin != coin);
    coins.push(CoinRecordOption {
        coin: coin.to_string(),
        value,
    });
}

// =============================================================================
// TESTS
// =============================================================================
