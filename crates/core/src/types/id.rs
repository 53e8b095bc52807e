//! Identifier for saved pass records.
//!
//! Saved passes are identified by the creation time in milliseconds since the
//! Unix epoch. The value travels as a JSON string so that clients never see a
//! float-truncated number.

use core::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A saved pass identifier derived from a timestamp.
///
/// # Example
///
/// ```rust
/// # use passly_core::SavedPassId;
/// let id: SavedPassId = "1700000000000".parse().unwrap();
/// assert_eq!(id.as_i64(), 1_700_000_000_000);
/// assert_eq!(id.next().to_string(), "1700000000001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SavedPassId(i64);

impl SavedPassId {
    /// Create an ID from a raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Create an ID from a timestamp (milliseconds since the epoch).
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    /// The ID immediately following this one.
    ///
    /// Used to resolve two records generated within the same millisecond.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SavedPassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SavedPassId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl From<i64> for SavedPassId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<SavedPassId> for i64 {
    fn from(id: SavedPassId) -> Self {
        id.0
    }
}

impl Serialize for SavedPassId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SavedPassId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older snapshots stored the id as a bare number.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Number(n) => Ok(Self(n)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_from_timestamp_uses_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_123_456).unwrap();
        assert_eq!(SavedPassId::from_timestamp(at).as_i64(), 1_700_000_123_456);
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&SavedPassId::new(42)).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn test_deserializes_string_or_number() {
        let from_text: SavedPassId = serde_json::from_str("\"42\"").unwrap();
        let from_number: SavedPassId = serde_json::from_str("42").unwrap();
        assert_eq!(from_text, from_number);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<SavedPassId>("\"abc\"").is_err());
        assert!("abc".parse::<SavedPassId>().is_err());
    }

    #[test]
    fn test_ordering_follows_time() {
        assert!(SavedPassId::new(1) < SavedPassId::new(1).next());
    }
}
