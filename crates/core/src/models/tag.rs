//! Channel and sequence tags

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Literal used for out-of-band insertions
pub const MANUAL_LABEL: &str = "Manual";

/// A guest's channel or sequence position
///
/// Guests placed by the assignment engine always carry numbered tags.
/// Guests inserted by hand carry `Manual` unless the operator supplies numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    Numbered(u32),
    Manual,
}

impl Tag {
    /// Numeric value, if this is not a manual tag
    pub fn number(&self) -> Option<u32> {
        match self {
            Tag::Numbered(n) => Some(*n),
            Tag::Manual => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Numbered(n) => write!(f, "{}", n),
            Tag::Manual => f.write_str(MANUAL_LABEL),
        }
    }
}

/// Error returned when a tag cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Expected a number or 'Manual', got '{0}'")]
pub struct ParseTagError(pub String);

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(MANUAL_LABEL) {
            return Ok(Tag::Manual);
        }
        s.parse::<u32>()
            .map(Tag::Numbered)
            .map_err(|_| ParseTagError(s.to_string()))
    }
}

// Numbered tags serialize as plain integers, manual tags as the "Manual" string.
impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tag::Numbered(n) => serializer.serialize_u32(*n),
            Tag::Manual => serializer.serialize_str(MANUAL_LABEL),
        }
    }
}

struct TagVisitor;

impl<'de> Visitor<'de> for TagVisitor {
    type Value = Tag;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a positive integer or \"{}\"", MANUAL_LABEL)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Tag, E> {
        u32::try_from(v)
            .map(Tag::Numbered)
            .map_err(|_| E::custom(format!("tag {} out of range", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Tag, E> {
        u64::try_from(v)
            .map_err(|_| E::custom(format!("tag {} is negative", v)))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Tag, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TagVisitor)
    }
}
