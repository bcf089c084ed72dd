//! # Core Type Definitions
//!
//! This module contains the shared types of the reconciliation engine:
//! - The uniform profile entity (`Record`, `RecordType`, `RecordGroup`)
//! - The stored profile shape consumed by the classifier (`SourceProfile`)
//! - The denormalized edit form (`ProfileEditorForm`)
//! - Error types (`ProfileError`)
//!
//! ## Ownership
//!
//! Every transformation takes borrowed input and returns freshly allocated
//! values. No type in this module carries identity across calls.

use crate::primitives::AVATAR_KEY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// RECORD TYPE
// =============================================================================

/// The protocol primitive a record maps to.
///
/// `Unknown` keeps any tag this version does not understand, verbatim, so
/// that records pass through every stage with their tag intact. The options
/// fold ignores it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordType {
    /// Plain key/value text record.
    Text,
    /// Coin address record, keyed by coin name.
    Addr,
    /// Content-hash pointer to off-chain content.
    Contenthash,
    /// Serialized application binary interface descriptor.
    Abi,
    /// Unrecognized tag, as received.
    Unknown(String),
}

impl RecordType {
    /// Wire name of the type tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Addr => "addr",
            Self::Contenthash => "contenthash",
            Self::Abi => "abi",
            Self::Unknown(tag) => tag,
        }
    }

    /// Parse a wire tag. Never fails: unrecognized tags become `Unknown`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "addr" => Self::Addr,
            "contenthash" => Self::Contenthash,
            "abi" => Self::Abi,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecordType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

// =============================================================================
// RECORD GROUP
// =============================================================================

/// Display category of a record, independent of its [`RecordType`].
///
/// The declaration order matches the canonical display order of groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordGroup {
    Media,
    General,
    Social,
    Address,
    Website,
    Other,
    Custom,
}

impl RecordGroup {
    /// All groups in display order.
    pub const ALL: [RecordGroup; 7] = [
        Self::Media,
        Self::General,
        Self::Social,
        Self::Address,
        Self::Website,
        Self::Other,
        Self::Custom,
    ];

    /// Wire name of the group tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::General => "general",
            Self::Social => "social",
            Self::Address => "address",
            Self::Website => "website",
            Self::Other => "other",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for RecordGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordGroup {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| ProfileError::InvalidInput(format!("Unknown record group: {}", s)))
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// One profile field in its uniform representation.
///
/// An empty `value` is the tombstone sentinel: the field is absent or is
/// being deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Field identifier. Case-sensitive.
    pub key: String,
    /// Protocol primitive this field is written through.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Display category.
    pub group: RecordGroup,
    /// Payload. Defaults to empty when the wire form omits it.
    #[serde(default)]
    pub value: String,
}

impl Record {
    /// Create a new record.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        record_type: RecordType,
        group: RecordGroup,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            record_type,
            group,
            value: value.into(),
        }
    }

    /// Create a text record.
    #[must_use]
    pub fn text(key: impl Into<String>, group: RecordGroup, value: impl Into<String>) -> Self {
        Self::new(key, RecordType::Text, group, value)
    }

    /// The avatar record as synthesized from an edit form.
    #[must_use]
    pub fn avatar(value: impl Into<String>) -> Self {
        Self::text(AVATAR_KEY, RecordGroup::Media, value)
    }

    /// Whether the record carries the empty-value sentinel.
    #[must_use]
    pub fn is_empty_value(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether this is the avatar record of the media group.
    #[must_use]
    pub fn is_media_avatar(&self) -> bool {
        self.key == AVATAR_KEY && self.group == RecordGroup::Media
    }

    /// Copy of this record with its value cleared.
    #[must_use]
    pub fn tombstone(&self) -> Self {
        Self {
            value: String::new(),
            ..self.clone()
        }
    }
}

// =============================================================================
// SOURCE PROFILE
// =============================================================================

/// A stored text entry as supplied by the profile reader.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextEntry {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// A stored coin entry. `name` is the coin's symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoinEntry {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Wrapper around the stored binary interface descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AbiEntry {
    #[serde(default)]
    pub abi: Option<serde_json::Value>,
}

/// The flat stored profile handed to the classifier.
///
/// All four fields are independent and may be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceProfile {
    #[serde(default)]
    pub texts: Vec<TextEntry>,
    #[serde(default)]
    pub coins: Vec<CoinEntry>,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub abi: Option<AbiEntry>,
}

// =============================================================================
// EDIT FORM
// =============================================================================

/// Edit form view: avatar lifted out of the record list.
///
/// `records` never contains the media avatar record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileEditorForm {
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub records: Vec<Record>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised around the engine.
///
/// The transformations themselves are total and never return these. They
/// are produced by table construction, configuration and document I/O.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// An input document violates a boundary limit or shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A configuration file could not be applied.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
