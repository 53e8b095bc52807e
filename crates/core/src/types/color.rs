//! Brand color type.

use core::fmt;

use serde::Serialize;

/// Error returned when a brand color is not a `#RRGGBB` hex string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid hex color format")]
pub struct HexColorError;

/// A `#RRGGBB` brand color.
///
/// Digits are accepted in either case and the original spelling is kept, so
/// `#ff0000` stays `#ff0000`.
///
/// ```
/// use passly_core::HexColor;
///
/// assert_eq!(HexColor::parse("#7123a9").unwrap().as_str(), "#7123a9");
/// assert!(HexColor::parse("#FFF").is_err());
/// assert!(HexColor::parse("invalid-color").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Wrap a literal known to be valid (used for the default snapshot).
    pub(crate) fn from_static(s: &'static str) -> Self {
        Self(s.to_owned())
    }

    /// Parse a `#RRGGBB` string.
    ///
    /// # Errors
    ///
    /// Returns [`HexColorError`] unless the input is `#` followed by exactly
    /// six hexadecimal digits.
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        let digits = s.strip_prefix('#').ok_or(HexColorError)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HexColorError);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the color as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components.
    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: core::ops::Range<usize>| {
            self.0
                .get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .unwrap_or(0)
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_both_cases_verbatim() {
        for input in ["#FF0000", "#ff0000", "#8B4513", "#7123a9", "#aBcDeF"] {
            assert_eq!(HexColor::parse(input).unwrap().as_str(), input);
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "",
            "#",
            "FF0000",
            "#FFF",
            "#FF00000",
            "#GG0000",
            " #FF0000",
            "#FF0000 ",
            "invalid-color",
            "#ff00é0",
        ] {
            assert_eq!(HexColor::parse(input), Err(HexColorError), "{input}");
        }
    }

    #[test]
    fn test_rgb() {
        let color = HexColor::parse("#8B4513").unwrap();
        assert_eq!(color.rgb(), (0x8B, 0x45, 0x13));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(HexColorError.to_string(), "Invalid hex color format");
    }
}
