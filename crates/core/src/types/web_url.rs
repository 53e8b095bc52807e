//! URL types for the business website and the pass logo.
//!
//! Both types keep the text as entered minus surrounding whitespace; `url`
//! is only used to check that the input is an absolute URL.

use core::fmt;

use serde::Serialize;
use url::Url;

/// Errors that can occur when parsing a [`WebUrl`] or [`LogoUrl`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The input is not an absolute URL.
    #[error("invalid URL: {0}")]
    Invalid(#[from] url::ParseError),
    /// The URL uses a scheme other than `http` or `https`.
    #[error("URL scheme must be http or https, got {0}")]
    UnsupportedScheme(String),
}

/// A public website address (`http` or `https` only).
///
/// ```
/// use passly_core::WebUrl;
///
/// assert!(WebUrl::parse("https://www.example.com").is_ok());
/// assert!(WebUrl::parse("www.example.com").is_err());
/// assert!(WebUrl::parse("javascript:alert(1)").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WebUrl(String);

impl WebUrl {
    /// Wrap a literal known to be valid (used for the default snapshot).
    pub(crate) fn from_static(s: &'static str) -> Self {
        Self(s.to_owned())
    }

    /// Parse a website URL.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::Invalid`] if the input is not an absolute URL and
    /// [`UrlError::UnsupportedScheme`] for schemes other than http(s).
    pub fn parse(s: &str) -> Result<Self, UrlError> {
        let s = s.trim();
        let url = Url::parse(s)?;
        match url.scheme() {
            "http" | "https" => Ok(Self(s.to_owned())),
            other => Err(UrlError::UnsupportedScheme(other.to_owned())),
        }
    }

    /// Returns the URL as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WebUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference to the pass logo.
///
/// Any absolute URL is accepted, including `data:` URLs produced by an
/// in-browser upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LogoUrl(String);

impl LogoUrl {
    /// Parse a logo reference.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::Invalid`] if the input is not an absolute URL.
    pub fn parse(s: &str) -> Result<Self, UrlError> {
        let s = s.trim();
        Url::parse(s)?;
        Ok(Self(s.to_owned()))
    }

    /// Returns the reference as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
