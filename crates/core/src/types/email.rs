//! Contact email type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid regex")
});

/// Why a contact email was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    /// Longer than the SMTP path limit.
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// Not `local@domain.tld`.
    #[error("invalid email format")]
    InvalidFormat,
}

/// The business contact email shown on the back of a pass.
///
/// Only the shape is checked: a local part, one `@`, and a domain ending in
/// a label of at least two letters.
///
/// ```
/// use passly_core::Email;
///
/// assert!(Email::parse("info@example.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
/// assert!(Email::parse("user@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Longest accepted address (RFC 5321 path limit).
    pub const MAX_LENGTH: usize = 254;

    pub(crate) fn from_static(s: &'static str) -> Self {
        Self(s.to_owned())
    }

    /// Validate a contact email.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] describing the first problem found.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        match s {
            "" => Err(EmailError::Empty),
            s if s.len() > Self::MAX_LENGTH => Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            }),
            s if !s.contains('@') => Err(EmailError::MissingAtSymbol),
            s if !EMAIL_RE.is_match(s) => Err(EmailError::InvalidFormat),
            s => Ok(Self(s.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        for email in [
            "info@example.com",
            "user.name@example.com",
            "user+tag@example.com",
            "hello@sub.example.com",
            "info@brewbeanscafe.com",
        ] {
            assert!(Email::parse(email).is_ok(), "{email}");
        }
    }

    #[test]
    fn test_rejections() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(
            Email::parse("no-at-symbol"),
            Err(EmailError::MissingAtSymbol)
        );
        for bad in ["@domain.com", "user@", "user@localhost", "a@b.c", "two words@example.com"] {
            assert_eq!(Email::parse(bad), Err(EmailError::InvalidFormat), "{bad}");
        }

        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            Email::parse(&long),
            Err(EmailError::TooLong { max: 254 })
        );
    }

    #[test]
    fn test_serializes_as_string() {
        let email = Email::parse("owner@example.com").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            serde_json::to_string(&email).unwrap_or_default(),
            "\"owner@example.com\""
        );
    }
}
