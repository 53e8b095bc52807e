//! Core types for Passly.
//!
//! This module provides type-safe wrappers for pass attributes.

pub mod color;
pub mod email;
pub mod id;
pub mod phone;
pub mod price;
pub mod status;
pub mod web_url;

pub use color::{HexColor, HexColorError};
pub use email::{Email, EmailError};
pub use id::SavedPassId;
pub use phone::{PhoneNumber, PhoneNumberError};
pub use price::{Price, PriceError};
pub use status::*;
pub use web_url::{LogoUrl, UrlError, WebUrl};

/// Deserialize string newtypes through their `parse` constructor so stored
/// data gets the same checks as user input.
macro_rules! deserialize_via_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                    Self::parse(&raw).map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

deserialize_via_parse!(HexColor, Email, PhoneNumber, WebUrl, LogoUrl);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_validates() {
        assert_eq!(
            serde_json::from_str::<HexColor>("\"#00ff00\"").unwrap().as_str(),
            "#00ff00"
        );
        assert!(serde_json::from_str::<HexColor>("\"not-a-color\"").is_err());
        assert!(serde_json::from_str::<Email>("\"nope\"").is_err());
        assert!(serde_json::from_str::<PhoneNumber>("\"call me\"").is_err());
        assert!(serde_json::from_str::<WebUrl>("\"ftp://example.com\"").is_err());
        assert!(serde_json::from_str::<LogoUrl>("\"logo.png\"").is_err());
    }

    #[test]
    fn test_deserialize_reports_reason() {
        let err = serde_json::from_str::<HexColor>("\"blue\"").unwrap_err();
        assert!(err.to_string().contains("Invalid hex color format"));
    }
}
