//! Contact phone number type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("Invalid regex"));

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The digits do not form an international-style number.
    #[error("invalid phone number format")]
    InvalidFormat,
}

/// An international-style phone number.
///
/// Spaces, dashes and parentheses are treated as punctuation; what remains
/// must be an optional `+` followed by up to sixteen digits, not starting
/// with zero. The number is stored as entered.
///
/// ```
/// use passly_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("+1 (555) 123-4567").unwrap();
/// assert_eq!(phone.as_str(), "+1 (555) 123-4567");
/// assert_eq!(phone.digits(), "+15551234567");
/// assert!(PhoneNumber::parse("call me").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Wrap a literal known to be valid (used for the default snapshot).
    pub(crate) fn from_static(s: &'static str) -> Self {
        Self(s.to_owned())
    }

    /// Parse a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneNumberError::Empty`] for blank input and
    /// [`PhoneNumberError::InvalidFormat`] when the stripped digits do not
    /// match the international pattern.
    pub fn parse(s: &str) -> Result<Self, PhoneNumberError> {
        if s.trim().is_empty() {
            return Err(PhoneNumberError::Empty);
        }
        if !PHONE_RE.is_match(&strip_punctuation(s)) {
            return Err(PhoneNumberError::InvalidFormat);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the number as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number without punctuation, suitable for `tel:` links.
    #[must_use]
    pub fn digits(&self) -> String {
        strip_punctuation(&self.0)
    }
}

fn strip_punctuation(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert!(PhoneNumber::parse("+10-6789887612").is_ok());
        assert!(PhoneNumber::parse("+1 (555) 123-4567").is_ok());
        assert!(PhoneNumber::parse("5551234567").is_ok());
        assert!(PhoneNumber::parse("+49 30 1234567").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(PhoneNumber::parse(""), Err(PhoneNumberError::Empty));
        assert_eq!(PhoneNumber::parse("   "), Err(PhoneNumberError::Empty));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            PhoneNumber::parse("0123456"),
            Err(PhoneNumberError::InvalidFormat)
        );
        assert_eq!(
            PhoneNumber::parse("+1 555 CALL NOW"),
            Err(PhoneNumberError::InvalidFormat)
        );
        assert_eq!(
            PhoneNumber::parse("+12345678901234567"),
            Err(PhoneNumberError::InvalidFormat)
        );
    }

    #[test]
    fn test_digits() {
        let phone = PhoneNumber::parse("+10-6789887612").unwrap();
        assert_eq!(phone.digits(), "+106789887612");
        assert_eq!(phone.as_str(), "+10-6789887612");
    }
}
