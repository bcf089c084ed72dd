//! # Content-Hash Decoding
//!
//! The seam between the classifier and the content-hash codec.
//!
//! Decoding runs in three stages, any of which may give up:
//! 1. [`ContentHashDecoder::decode`] turns the stored value into a URI
//! 2. [`get_protocol_type`] recognizes the protocol family of that URI
//! 3. [`protocol_key`] names the website record for that family
//!
//! A `None` at any stage means the profile has no website record.

use std::fmt;

/// Protocol families a content hash can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolType {
    Ipfs,
    Ipns,
    Swarm,
    Onion,
    Onion3,
    Skynet,
    Arweave,
}

impl ProtocolType {
    /// Recognize a URI scheme.
    #[must_use]
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "ipfs" => Some(Self::Ipfs),
            "ipns" => Some(Self::Ipns),
            "bzz" => Some(Self::Swarm),
            "onion" => Some(Self::Onion),
            "onion3" => Some(Self::Onion3),
            "sia" => Some(Self::Skynet),
            "arweave" | "ar" => Some(Self::Arweave),
            _ => None,
        }
    }
}

impl fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(protocol_key(*self))
    }
}

/// A content hash whose protocol family was recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContentHash {
    pub protocol_type: ProtocolType,
    /// The bare hash with the scheme stripped.
    pub decoded: String,
}

/// Converts a stored content hash into its `scheme://hash` form.
pub trait ContentHashDecoder {
    /// Returns `None` for values this decoder cannot read.
    fn decode(&self, encoded: &str) -> Option<String>;
}

/// Decoder for profile readers that already deliver content hashes as URIs.
///
/// Empty values and the empty hash `0x` decode to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriContentHash;

impl ContentHashDecoder for UriContentHash {
    fn decode(&self, encoded: &str) -> Option<String> {
        let trimmed = encoded.trim();
        if trimmed.is_empty() || trimmed == "0x" {
            return None;
        }
        let (scheme, hash) = trimmed.split_once("://")?;
        if scheme.is_empty() || hash.is_empty() {
            return None;
        }
        Some(trimmed.to_string())
    }
}

impl<F> ContentHashDecoder for F
where
    F: Fn(&str) -> Option<String>,
{
    fn decode(&self, encoded: &str) -> Option<String> {
        self(encoded)
    }
}

/// Recognize the protocol family of a decoded content-hash URI.
#[must_use]
pub fn get_protocol_type(uri: &str) -> Option<DecodedContentHash> {
    let (scheme, hash) = uri.split_once("://")?;
    let protocol_type = ProtocolType::from_scheme(&scheme.to_ascii_lowercase())?;
    if hash.is_empty() {
        return None;
    }
    Some(DecodedContentHash {
        protocol_type,
        decoded: hash.to_string(),
    })
}

/// Record key for a protocol family.
#[must_use]
pub const fn protocol_key(protocol_type: ProtocolType) -> &'static str {
    match protocol_type {
        ProtocolType::Ipfs => "ipfs",
        ProtocolType::Ipns => "ipns",
        ProtocolType::Swarm => "swarm",
        ProtocolType::Onion => "onion",
        ProtocolType::Onion3 => "onion3",
        ProtocolType::Skynet => "skynet",
        ProtocolType::Arweave => "arweave",
    }
}

/// Run all three stages. Returns the record key and the decoded URI.
pub fn decode_content_hash<D>(decoder: &D, encoded: &str) -> Option<(&'static str, String)>
where
    D: ContentHashDecoder + ?Sized,
{
    let uri = decoder.decode(encoded)?;
    let info = get_protocol_type(&uri)?;
    tracing::trace!(protocol = %info.protocol_type, hash = %info.decoded, "decoded content hash");
    Some((protocol_key(info.protocol_type), uri))
}
