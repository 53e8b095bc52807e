//! Validation errors raised by draft mutators.

use serde::Serialize;

use super::DraftField;
use crate::types::{EmailError, HexColorError, PhoneNumberError, PriceError, UrlError};

/// What was wrong with a rejected value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Free text longer than the field allows.
    #[error("must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Integer outside the allowed range.
    #[error("must be between {min} and {max}")]
    OutOfRange {
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
    #[error(transparent)]
    Price(#[from] PriceError),
    #[error(transparent)]
    Color(#[from] HexColorError),
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Phone(#[from] PhoneNumberError),
    #[error(transparent)]
    Url(#[from] UrlError),
    /// The value has the wrong JSON type or is not a known variant.
    #[error("{0}")]
    InvalidValue(String),
    /// The field is maintained by the store and cannot be patched.
    #[error("is read-only")]
    ReadOnly,
}

impl ValidationErrorKind {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TooLong { .. } => "too_long",
            Self::OutOfRange { .. } => "out_of_range",
            Self::Price(_) => "invalid_amount",
            Self::Color(_) => "invalid_color",
            Self::Email(_) => "invalid_email",
            Self::Phone(_) => "invalid_phone",
            Self::Url(_) => "invalid_url",
            Self::InvalidValue(_) => "invalid_value",
            Self::ReadOnly => "read_only",
        }
    }
}

/// A rejected single-field mutation.
///
/// The draft is left exactly as it was before the call.
///
/// ```
/// use passly_core::PassDraft;
///
/// let mut draft = PassDraft::default();
/// let err = draft.set_stamps_needed(21).unwrap_err();
/// assert_eq!(err.to_string(), "Stamps needed must be between 1 and 20");
/// assert_eq!(draft.fields().stamps_needed, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field the value was meant for.
    pub field: DraftField,
    /// Reason for the rejection.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Create a validation error.
    #[must_use]
    pub const fn new(field: DraftField, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Serializable view for API responses.
    #[must_use]
    pub fn to_body(&self) -> ValidationErrorBody {
        ValidationErrorBody {
            field: self.field.key(),
            code: self.code(),
            message: self.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            // The color and email messages already name what is wrong.
            ValidationErrorKind::Color(err) => write!(f, "{err}"),
            ValidationErrorKind::Email(err) => write!(f, "Invalid email address: {err}"),
            kind => write!(f, "{} {kind}", self.field.label()),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// JSON shape of a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrorBody {
    pub field: &'static str,
    pub code: &'static str,
    pub message: String,
}

/// Errors for whole-payload operations (hydrate, patch).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The payload is not a JSON object.
    #[error("payload must be a JSON object, got {found}")]
    NotAnObject {
        /// JSON type that was supplied instead.
        found: &'static str,
    },
    /// One or more fields were rejected; nothing was applied.
    #[error("{} field(s) rejected: {}", .0.len(), summary(.0))]
    Invalid(Vec<ValidationError>),
}

fn summary(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ValidationError::new(
            DraftField::StampsNeeded,
            ValidationErrorKind::OutOfRange { min: 1, max: 20 },
        );
        assert_eq!(err.to_string(), "Stamps needed must be between 1 and 20");

        let err = ValidationError::new(
            DraftField::CampaignName,
            ValidationErrorKind::TooLong { max: 100 },
        );
        assert_eq!(
            err.to_string(),
            "Campaign name must be at most 100 characters"
        );

        let err = ValidationError::new(DraftField::BrandColor, HexColorError.into());
        assert_eq!(err.to_string(), "Invalid hex color format");
    }

    #[test]
    fn test_body() {
        let err = ValidationError::new(DraftField::Email, EmailError::InvalidFormat.into());
        let body = err.to_body();
        assert_eq!(body.field, "email");
        assert_eq!(body.code, "invalid_email");
        assert_eq!(body.message, "Invalid email address: invalid email format");
    }
}
