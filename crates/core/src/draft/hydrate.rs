//! Applying JSON payloads to a draft.
//!
//! Two flavours exist:
//! - [`PassDraft::hydrate`] restores a persisted snapshot. It is lenient:
//!   unknown keys are ignored and bad values are skipped and reported.
//! - [`PassDraft::apply_patch`] backs form submissions. It is strict: every
//!   recognized key must validate or nothing is applied.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{
    DraftField, PassDraft, PassFields, PayloadError, ValidationError, ValidationErrorKind,
};

/// Outcome of [`PassDraft::hydrate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HydrateReport {
    /// Fields taken from the payload.
    pub applied: Vec<DraftField>,
    /// Keys that are not draft fields.
    pub ignored: Vec<String>,
    /// Recognized fields whose values were refused; previous values kept.
    #[serde(skip)]
    pub rejected: Vec<ValidationError>,
}

impl HydrateReport {
    /// Whether every recognized key was applied.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl PassDraft {
    /// Set a single field from a JSON value.
    ///
    /// Strings, numbers and `null` are decoded according to the field and
    /// then passed through the field's validated setter. Numeric fields also
    /// accept numeric strings, which is what HTML forms submit.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the value has the wrong shape, fails
    /// validation, or targets a read-only field.
    pub fn set_field(&mut self, field: DraftField, value: &Value) -> Result<(), ValidationError> {
        match field {
            DraftField::CampaignName => self.set_campaign_name(text(field, value)?),
            DraftField::PassType => {
                self.set_pass_type(parse_variant(field, value)?);
                Ok(())
            }
            DraftField::BrandColor => self.set_brand_color(text(field, value)?),
            DraftField::LogoUrl => match value {
                Value::Null => self.set_logo_url(None),
                other => self.set_logo_url(Some(text(field, other)?)),
            },
            DraftField::Tagline => self.set_tagline(text(field, value)?),
            DraftField::RewardDescription => self.set_reward_description(text(field, value)?),
            DraftField::StampsNeeded => self.set_stamps_needed(integer(field, value)?),
            DraftField::MinPurchase => self.set_min_purchase(decimal(field, value)?),
            DraftField::BusinessName => self.set_business_name(text(field, value)?),
            DraftField::BusinessAddress => self.set_business_address(text(field, value)?),
            DraftField::Contact => self.set_contact(text(field, value)?),
            DraftField::Email => self.set_email(text(field, value)?),
            DraftField::Website => self.set_website(text(field, value)?),
            DraftField::SocialMedia => self.set_social_media(text(field, value)?),
            DraftField::WelcomeMessage => self.set_welcome_message(text(field, value)?),
            DraftField::Instructions => self.set_instructions(text(field, value)?),
            DraftField::SpecialOffers => self.set_special_offers(text(field, value)?),
            DraftField::OffersFrequency => {
                self.set_offers_frequency(parse_variant(field, value)?);
                Ok(())
            }
            DraftField::Status | DraftField::CreatedAt | DraftField::UpdatedAt => Err(
                ValidationError::new(field, ValidationErrorKind::ReadOnly),
            ),
        }
    }

    /// Merge a persisted snapshot into the draft.
    ///
    /// Only recognized keys are considered; anything else is silently
    /// ignored. Each recognized key is applied on its own, so one bad value
    /// does not block the rest. Bookkeeping keys (`status`, `createdAt`,
    /// `updatedAt`) are restored as-is.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::NotAnObject`] if the payload is not an object.
    pub fn hydrate(&mut self, payload: &Value) -> Result<HydrateReport, PayloadError> {
        let object = as_object(payload)?;
        let mut report = HydrateReport::default();
        let mut restored_updated_at: Option<DateTime<Utc>> = None;

        for (key, value) in object {
            let Some(field) = DraftField::from_key(key) else {
                report.ignored.push(key.clone());
                continue;
            };

            let result = match field {
                DraftField::Status => deserialize(field, value).map(|status| self.status = status),
                DraftField::CreatedAt => deserialize(field, value).map(|at| self.created_at = at),
                DraftField::UpdatedAt => {
                    deserialize(field, value).map(|at| restored_updated_at = Some(at))
                }
                _ => self.set_field(field, value),
            };

            match result {
                Ok(()) => report.applied.push(field),
                Err(err) => report.rejected.push(err),
            }
        }

        match restored_updated_at {
            Some(at) => self.updated_at = at,
            None if !report.applied.is_empty() => self.touch(),
            None => {}
        }

        Ok(report)
    }

    /// Apply a form submission atomically.
    ///
    /// Every recognized key is validated against a scratch copy; if any is
    /// rejected, the draft is left untouched and all rejections are returned.
    /// Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::NotAnObject`] for non-object payloads and
    /// [`PayloadError::Invalid`] with every rejection otherwise.
    pub fn apply_patch(&mut self, payload: &Value) -> Result<Vec<DraftField>, PayloadError> {
        let object = as_object(payload)?;
        let mut scratch = self.clone();
        let mut applied = Vec::new();
        let mut errors = Vec::new();

        for (key, value) in object {
            let Some(field) = DraftField::from_key(key) else {
                continue;
            };
            match scratch.set_field(field, value) {
                Ok(()) => applied.push(field),
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(PayloadError::Invalid(errors));
        }

        *self = scratch;
        Ok(applied)
    }
}

impl TryFrom<Map<String, Value>> for PassFields {
    type Error = PayloadError;

    /// Strict decode of stored pass data: every recognized key must pass its
    /// setter.
    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut draft = PassDraft::default();
        draft.apply_patch(&Value::Object(object))?;
        Ok(draft.fields)
    }
}

// =============================================================================
// Decoding helpers
// =============================================================================

fn as_object(payload: &Value) -> Result<&Map<String, Value>, PayloadError> {
    payload.as_object().ok_or(PayloadError::NotAnObject {
        found: json_type(payload),
    })
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn wrong_type(field: DraftField, expected: &str, value: &Value) -> ValidationError {
    ValidationError::new(
        field,
        ValidationErrorKind::InvalidValue(format!(
            "expected {expected}, got {}",
            json_type(value)
        )),
    )
}

fn text(field: DraftField, value: &Value) -> Result<&str, ValidationError> {
    value.as_str().ok_or_else(|| wrong_type(field, "a string", value))
}

fn integer(field: DraftField, value: &Value) -> Result<i64, ValidationError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| wrong_type(field, "a whole number", value)),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| wrong_type(field, "a whole number", value)),
        _ => Err(wrong_type(field, "a whole number", value)),
    }
}

fn decimal(field: DraftField, value: &Value) -> Result<Decimal, ValidationError> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_owned(),
        _ => return Err(wrong_type(field, "a number", value)),
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| wrong_type(field, "a number", value))
}

fn parse_variant<T>(field: DraftField, value: &Value) -> Result<T, ValidationError>
where
    T: FromStr<Err = String>,
{
    text(field, value)?
        .parse()
        .map_err(|msg| ValidationError::new(field, ValidationErrorKind::InvalidValue(msg)))
}

fn deserialize<T: DeserializeOwned>(field: DraftField, value: &Value) -> Result<T, ValidationError> {
    T::deserialize(value)
        .map_err(|e| ValidationError::new(field, ValidationErrorKind::InvalidValue(e.to_string())))
}
