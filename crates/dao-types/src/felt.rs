//! # Chain Primitives
//!
//! Felt and address handling for the source chain.
//!
//! A *felt* is the chain's fixed-width field element, used to encode
//! integers, booleans, addresses, and packed short strings alike. 252 bits
//! fit comfortably in a `U256`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// Re-export U256 from primitive-types for use across the workspace.
pub use primitive_types::U256 as Felt;

/// A 32-byte contract or account address, big-endian.
///
/// Serializes as a `0x`-prefixed lowercase hex string so stored documents
/// and query results stay human-readable. Parsing is strict: the `0x`
/// prefix is mandatory and anything longer than 32 bytes is rejected,
/// never truncated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 32]);

/// Errors raised while parsing a user-supplied address string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressParseError {
    /// The string did not start with `0x`.
    #[error("address must start with 0x, got '{0}'")]
    MissingPrefix(String),

    /// The hex payload failed to decode.
    #[error("invalid hex in address: {0}")]
    InvalidHex(String),

    /// More than 32 bytes of payload.
    #[error("address too long: {got} bytes, max 32")]
    TooLong { got: usize },
}

impl Address {
    /// Build an address from a felt's big-endian bytes.
    pub fn from_felt(felt: Felt) -> Self {
        let mut bytes = [0u8; 32];
        felt.to_big_endian(&mut bytes);
        Self(bytes)
    }

    /// The address as a felt.
    pub fn to_felt(&self) -> Felt {
        Felt::from_big_endian(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// Debug prints the same 0x form as Display; 32 raw bytes are noise.
impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = s
            .strip_prefix("0x")
            .ok_or_else(|| AddressParseError::MissingPrefix(s.to_owned()))?;
        // Tolerate odd-length hex by left-padding a nibble.
        let padded;
        let payload = if payload.len() % 2 == 1 {
            padded = format!("0{payload}");
            padded.as_str()
        } else {
            payload
        };
        let bytes =
            hex::decode(payload).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        if bytes.len() > 32 {
            return Err(AddressParseError::TooLong { got: bytes.len() });
        }
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors raised while unpacking a felt-encoded short string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShortStringError {
    /// The packed bytes were not valid UTF-8.
    #[error("packed string is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

/// Unpack a big-endian felt into the short ASCII string it encodes.
///
/// The chain packs up to 31 characters into a single felt byte-by-byte;
/// leading zero bytes are padding, not content. A zero felt unpacks to the
/// empty string.
pub fn felt_to_short_string(felt: Felt) -> Result<String, ShortStringError> {
    let mut bytes = [0u8; 32];
    felt.to_big_endian(&mut bytes);
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    String::from_utf8(bytes[start..].to_vec())
        .map_err(|e| ShortStringError::InvalidUtf8(e.to_string()))
}

/// Pack a short ASCII string into a felt, the inverse of
/// [`felt_to_short_string`]. Strings longer than 31 bytes do not fit in a
/// felt and panic; callers are test fixtures and schema tooling.
pub fn short_string_to_felt(text: &str) -> Felt {
    assert!(text.len() <= 31, "short string exceeds 31 bytes: {text:?}");
    Felt::from_big_endian(text.as_bytes())
}
