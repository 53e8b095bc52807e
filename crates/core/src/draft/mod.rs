//! The loyalty pass record edited across the wizard.
//!
//! A [`PassDraft`] is created with a fixed default snapshot (not an empty
//! record) and changed one field at a time. Every setter validates its input
//! first: a rejected value returns a [`ValidationError`] and leaves the draft
//! untouched, `updatedAt` included.

mod error;
mod field;
mod hydrate;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use error::{PayloadError, ValidationError, ValidationErrorBody, ValidationErrorKind};
pub use field::DraftField;
pub use hydrate::HydrateReport;

use crate::types::{
    Email, HexColor, LogoUrl, OffersFrequency, PassCategory, PassStatus, PhoneNumber, Price,
    WebUrl,
};

/// Inclusive bounds for the number of stamps on a card.
pub const STAMPS_RANGE: core::ops::RangeInclusive<i64> = 1..=20;

/// The pass attributes, without lifecycle bookkeeping.
///
/// This is the `data` payload embedded in saved pass records. Deserializing
/// runs every field through the same setters as user input; keys that are
/// missing keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct PassFields {
    pub campaign_name: String,
    #[serde(rename = "type")]
    pub pass_type: PassCategory,
    pub brand_color: HexColor,
    pub logo_url: Option<LogoUrl>,
    pub tagline: String,
    pub reward_description: String,
    pub stamps_needed: u8,
    pub min_purchase: Price,
    pub business_name: String,
    pub business_address: String,
    pub contact: PhoneNumber,
    pub email: Email,
    pub website: WebUrl,
    pub social_media: String,
    pub welcome_message: String,
    pub instructions: String,
    pub special_offers: String,
    pub offers_frequency: OffersFrequency,
}

impl Default for PassFields {
    fn default() -> Self {
        Self {
            campaign_name: String::new(),
            pass_type: PassCategory::Store,
            brand_color: HexColor::from_static("#7123a9"),
            logo_url: None,
            tagline: "Join our loyalty program today!".to_string(),
            reward_description: "Free Coffee".to_string(),
            stamps_needed: 5,
            min_purchase: Price::from_units(700),
            business_name: "Your Business".to_string(),
            business_address: "123 Main St, Anytown, USA".to_string(),
            contact: PhoneNumber::from_static("+10-6789887612"),
            email: Email::from_static("info@example.com"),
            website: WebUrl::from_static("https://www.example.com"),
            social_media: "facebook.com/example, twitter.com/example".to_string(),
            welcome_message: "Welcome to our loyalty program!".to_string(),
            instructions: "Collect stamps to earn rewards.".to_string(),
            special_offers: "Check out our exclusive offers!".to_string(),
            offers_frequency: OffersFrequency::Monthly,
        }
    }
}

/// The in-progress loyalty pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassDraft {
    #[serde(flatten)]
    fields: PassFields,
    status: PassStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for PassDraft {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl PassDraft {
    /// Create the default snapshot stamped with `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            fields: PassFields::default(),
            status: PassStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// The pass attributes.
    #[must_use]
    pub const fn fields(&self) -> &PassFields {
        &self.fields
    }

    /// Lifecycle status.
    #[must_use]
    pub const fn status(&self) -> PassStatus {
        self.status
    }

    /// When the draft was created (or last cleared).
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the draft last changed.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // =========================================================================
    // Field setters
    // =========================================================================

    /// Set the campaign name (at most 100 characters).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::TooLong`] if the name is too long.
    pub fn set_campaign_name(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.campaign_name = bounded(DraftField::CampaignName, value)?;
        self.touch();
        Ok(())
    }

    /// Set the pass category.
    pub fn set_pass_type(&mut self, value: PassCategory) {
        self.fields.pass_type = value;
        self.touch();
    }

    /// Set the brand color (`#RRGGBB`, either case, stored verbatim).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::Color`] for anything else.
    pub fn set_brand_color(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.brand_color = HexColor::parse(value).map_err(|e| invalid(DraftField::BrandColor, e))?;
        self.touch();
        Ok(())
    }

    /// Set or clear the logo reference.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::Url`] if the value is not an absolute URL.
    pub fn set_logo_url(&mut self, value: Option<&str>) -> Result<(), ValidationError> {
        self.fields.logo_url = value
            .map(LogoUrl::parse)
            .transpose()
            .map_err(|e| invalid(DraftField::LogoUrl, e))?;
        self.touch();
        Ok(())
    }

    /// Set the tagline (at most 200 characters).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::TooLong`] if the text is too long.
    pub fn set_tagline(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.tagline = bounded(DraftField::Tagline, value)?;
        self.touch();
        Ok(())
    }

    /// Set the reward description (at most 500 characters).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::TooLong`] if the text is too long.
    pub fn set_reward_description(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.reward_description = bounded(DraftField::RewardDescription, value)?;
        self.touch();
        Ok(())
    }

    /// Set the number of stamps needed for the reward (1 to 20).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::OutOfRange`] outside `1..=20`.
    pub fn set_stamps_needed(&mut self, value: i64) -> Result<(), ValidationError> {
        let stamps = u8::try_from(value)
            .ok()
            .filter(|_| STAMPS_RANGE.contains(&value))
            .ok_or_else(|| {
                ValidationError::new(
                    DraftField::StampsNeeded,
                    ValidationErrorKind::OutOfRange {
                        min: *STAMPS_RANGE.start(),
                        max: *STAMPS_RANGE.end(),
                    },
                )
            })?;
        self.fields.stamps_needed = stamps;
        self.touch();
        Ok(())
    }

    /// Set the minimum purchase that earns a stamp.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::Price`] for negative amounts.
    pub fn set_min_purchase(&mut self, value: Decimal) -> Result<(), ValidationError> {
        self.fields.min_purchase = Price::new(value).map_err(|e| invalid(DraftField::MinPurchase, e))?;
        self.touch();
        Ok(())
    }

    /// Set the business name (at most 100 characters).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::TooLong`] if the name is too long.
    pub fn set_business_name(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.business_name = bounded(DraftField::BusinessName, value)?;
        self.touch();
        Ok(())
    }

    /// Set the business address (at most 500 characters).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::TooLong`] if the address is too long.
    pub fn set_business_address(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.business_address = bounded(DraftField::BusinessAddress, value)?;
        self.touch();
        Ok(())
    }

    /// Set the contact phone number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::Phone`] if the number is malformed.
    pub fn set_contact(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.contact = PhoneNumber::parse(value).map_err(|e| invalid(DraftField::Contact, e))?;
        self.touch();
        Ok(())
    }

    /// Set the contact email.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::Email`] if the address is malformed.
    pub fn set_email(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.email = Email::parse(value).map_err(|e| invalid(DraftField::Email, e))?;
        self.touch();
        Ok(())
    }

    /// Set the business website (absolute http or https URL).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::Url`] if the URL is not acceptable.
    pub fn set_website(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.website = WebUrl::parse(value).map_err(|e| invalid(DraftField::Website, e))?;
        self.touch();
        Ok(())
    }

    /// Set the social media handles (at most 500 characters).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::TooLong`] if the text is too long.
    pub fn set_social_media(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.social_media = bounded(DraftField::SocialMedia, value)?;
        self.touch();
        Ok(())
    }

    /// Set the welcome message (at most 1000 characters).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::TooLong`] if the text is too long.
    pub fn set_welcome_message(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.welcome_message = bounded(DraftField::WelcomeMessage, value)?;
        self.touch();
        Ok(())
    }

    /// Set the usage instructions (at most 1000 characters).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::TooLong`] if the text is too long.
    pub fn set_instructions(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.instructions = bounded(DraftField::Instructions, value)?;
        self.touch();
        Ok(())
    }

    /// Set the special offers text (at most 1000 characters).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::TooLong`] if the text is too long.
    pub fn set_special_offers(&mut self, value: &str) -> Result<(), ValidationError> {
        self.fields.special_offers = bounded(DraftField::SpecialOffers, value)?;
        self.touch();
        Ok(())
    }

    /// Set how often offers are pushed.
    pub fn set_offers_frequency(&mut self, value: OffersFrequency) {
        self.fields.offers_frequency = value;
        self.touch();
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Mark the draft as published.
    pub fn publish(&mut self) {
        self.status = PassStatus::Published;
        self.touch();
    }

    /// Mark the draft as archived.
    pub fn archive(&mut self) {
        self.status = PassStatus::Archived;
        self.touch();
    }

    /// Replace everything with the default snapshot and restamp both times.
    pub fn reset(&mut self) {
        *self = Self::new(Utc::now());
    }
}

fn bounded(field: DraftField, value: &str) -> Result<String, ValidationError> {
    if let Some(max) = field.max_len() {
        if value.chars().count() > max {
            return Err(ValidationError::new(
                field,
                ValidationErrorKind::TooLong { max },
            ));
        }
    }
    Ok(value.to_owned())
}

fn invalid(field: DraftField, err: impl Into<ValidationErrorKind>) -> ValidationError {
    ValidationError::new(field, err.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn assert_rejected(draft: &PassDraft, before: &PassDraft) {
        assert_eq!(draft, before, "rejected mutation must not change the draft");
    }

    #[test]
    fn test_defaults() {
        let draft = PassDraft::default();
        let fields = draft.fields();
        assert_eq!(fields.campaign_name, "");
        assert_eq!(fields.pass_type, PassCategory::Store);
        assert_eq!(fields.brand_color.as_str(), "#7123a9");
        assert_eq!(fields.logo_url, None);
        assert_eq!(fields.stamps_needed, 5);
        assert_eq!(fields.min_purchase, Price::from_units(700));
        assert_eq!(fields.offers_frequency, OffersFrequency::Monthly);
        assert_eq!(draft.status(), PassStatus::Draft);
        assert_eq!(draft.created_at(), draft.updated_at());
    }

    #[test]
    fn test_defaults_satisfy_their_own_rules() {
        let defaults = PassFields::default();
        let mut draft = PassDraft::default();
        draft.set_campaign_name(&defaults.campaign_name).unwrap();
        draft.set_brand_color(defaults.brand_color.as_str()).unwrap();
        draft.set_tagline(&defaults.tagline).unwrap();
        draft.set_reward_description(&defaults.reward_description).unwrap();
        draft.set_stamps_needed(i64::from(defaults.stamps_needed)).unwrap();
        draft.set_min_purchase(defaults.min_purchase.amount()).unwrap();
        draft.set_business_name(&defaults.business_name).unwrap();
        draft.set_business_address(&defaults.business_address).unwrap();
        draft.set_contact(defaults.contact.as_str()).unwrap();
        draft.set_email(defaults.email.as_str()).unwrap();
        draft.set_website(defaults.website.as_str()).unwrap();
        draft.set_social_media(&defaults.social_media).unwrap();
        draft.set_welcome_message(&defaults.welcome_message).unwrap();
        draft.set_instructions(&defaults.instructions).unwrap();
        draft.set_special_offers(&defaults.special_offers).unwrap();
        assert_eq!(draft.fields(), &defaults);
    }

    #[test]
    fn test_set_campaign_name() {
        let mut draft = PassDraft::default();
        let before = draft.updated_at();
        draft.set_campaign_name("Test Campaign").unwrap();
        assert_eq!(draft.fields().campaign_name, "Test Campaign");
        assert!(draft.updated_at() >= before);
    }

    #[test]
    fn test_campaign_name_length() {
        let mut draft = PassDraft::default();
        draft.set_campaign_name(&"a".repeat(100)).unwrap();

        let before = draft.clone();
        let err = draft.set_campaign_name(&"a".repeat(101)).unwrap_err();
        assert_eq!(err.field, DraftField::CampaignName);
        assert_eq!(err.kind, ValidationErrorKind::TooLong { max: 100 });
        assert_rejected(&draft, &before);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut draft = PassDraft::default();
        draft.set_tagline(&"é".repeat(200)).unwrap();
        assert!(draft.set_tagline(&"é".repeat(201)).is_err());
    }

    #[test]
    fn test_brand_color() {
        let mut draft = PassDraft::default();
        draft.set_brand_color("#FF0000").unwrap();
        assert_eq!(draft.fields().brand_color.as_str(), "#FF0000");
        draft.set_brand_color("#00ff7f").unwrap();
        assert_eq!(draft.fields().brand_color.as_str(), "#00ff7f");

        let before = draft.clone();
        let err = draft.set_brand_color("invalid-color").unwrap_err();
        assert_eq!(err.to_string(), "Invalid hex color format");
        assert_rejected(&draft, &before);
    }

    #[test]
    fn test_stamps_needed_range() {
        let mut draft = PassDraft::default();
        for n in -3..=25 {
            let before = draft.clone();
            let result = draft.set_stamps_needed(n);
            if (1..=20).contains(&n) {
                assert!(result.is_ok(), "{n} should be accepted");
                assert_eq!(i64::from(draft.fields().stamps_needed), n);
            } else {
                let err = result.unwrap_err();
                assert_eq!(err.to_string(), "Stamps needed must be between 1 and 20");
                assert_rejected(&draft, &before);
            }
        }
        assert!(draft.set_stamps_needed(i64::MAX).is_err());
        assert!(draft.set_stamps_needed(256).is_err());
    }

    #[test]
    fn test_min_purchase() {
        let mut draft = PassDraft::default();
        draft.set_min_purchase(Decimal::ZERO).unwrap();
        draft.set_min_purchase(Decimal::new(4999, 2)).unwrap();
        assert_eq!(draft.fields().min_purchase.amount(), Decimal::new(4999, 2));

        let before = draft.clone();
        assert!(draft.set_min_purchase(Decimal::new(-1, 0)).is_err());
        assert_rejected(&draft, &before);
    }

    #[test]
    fn test_logo_url() {
        let mut draft = PassDraft::default();
        draft.set_logo_url(Some("https://cdn.example.com/logo.png")).unwrap();
        assert!(draft.fields().logo_url.is_some());
        draft.set_logo_url(None).unwrap();
        assert!(draft.fields().logo_url.is_none());

        let err = draft.set_logo_url(Some("logo.png")).unwrap_err();
        assert_eq!(err.code(), "invalid_url");
    }

    #[test]
    fn test_contact_email_website() {
        let mut draft = PassDraft::default();
        draft.set_contact("+1 (555) 123-4567").unwrap();
        draft.set_email("info@brewbeanscafe.com").unwrap();
        draft.set_website("https://www.brewbeanscafe.com").unwrap();

        let before = draft.clone();
        assert_eq!(draft.set_contact("not a phone").unwrap_err().code(), "invalid_phone");
        assert_eq!(draft.set_email("info@").unwrap_err().code(), "invalid_email");
        assert_eq!(draft.set_website("www.example.com").unwrap_err().code(), "invalid_url");
        assert_rejected(&draft, &before);
    }

    #[test]
    fn test_message_bounds() {
        let mut draft = PassDraft::default();
        draft.set_welcome_message(&"w".repeat(1000)).unwrap();
        assert!(draft.set_welcome_message(&"w".repeat(1001)).is_err());
        assert!(draft.set_instructions(&"i".repeat(1001)).is_err());
        assert!(draft.set_special_offers(&"s".repeat(1001)).is_err());
        assert!(draft.set_business_address(&"b".repeat(501)).is_err());
        assert!(draft.set_reward_description(&"r".repeat(501)).is_err());
    }

    #[test]
    fn test_publish_and_archive_overwrite_status() {
        let mut draft = PassDraft::default();
        draft.publish();
        assert_eq!(draft.status(), PassStatus::Published);
        draft.archive();
        assert_eq!(draft.status(), PassStatus::Archived);
        draft.publish();
        assert_eq!(draft.status(), PassStatus::Published);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut draft = PassDraft::default();
        let created = draft.created_at();
        draft.set_campaign_name("Summer Coffee Lovers").unwrap();
        draft.set_pass_type(PassCategory::Coupon);
        draft.set_stamps_needed(8).unwrap();
        draft.publish();

        draft.reset();
        assert_eq!(draft.fields(), &PassFields::default());
        assert_eq!(draft.status(), PassStatus::Draft);
        assert!(draft.created_at() >= created);
        assert_eq!(draft.created_at(), draft.updated_at());
    }

    #[test]
    fn test_serializes_camel_case_flat() {
        let draft = PassDraft::default();
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["campaignName"], "");
        assert_eq!(value["type"], "store");
        assert_eq!(value["brandColor"], "#7123a9");
        assert_eq!(value["logoUrl"], serde_json::Value::Null);
        assert_eq!(value["stampsNeeded"], 5);
        assert_eq!(value["offersFrequency"], "Monthly");
        assert_eq!(value["status"], "draft");
        assert!(value["createdAt"].is_string());

        let back: PassDraft = serde_json::from_value(value).unwrap();
        assert_eq!(back, draft);
    }
}
