//! Field catalogue for [`PassDraft`](super::PassDraft).

use serde::{Deserialize, Serialize};

/// Every attribute of a pass draft, addressed by its camelCase wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    CampaignName,
    #[serde(rename = "type")]
    PassType,
    BrandColor,
    LogoUrl,
    Tagline,
    RewardDescription,
    StampsNeeded,
    MinPurchase,
    BusinessName,
    BusinessAddress,
    Contact,
    Email,
    Website,
    SocialMedia,
    WelcomeMessage,
    Instructions,
    SpecialOffers,
    OffersFrequency,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl DraftField {
    /// Every field, in wizard order.
    pub const ALL: [Self; 21] = [
        Self::CampaignName,
        Self::PassType,
        Self::BrandColor,
        Self::LogoUrl,
        Self::Tagline,
        Self::RewardDescription,
        Self::StampsNeeded,
        Self::MinPurchase,
        Self::BusinessName,
        Self::BusinessAddress,
        Self::Contact,
        Self::Email,
        Self::Website,
        Self::SocialMedia,
        Self::WelcomeMessage,
        Self::Instructions,
        Self::SpecialOffers,
        Self::OffersFrequency,
        Self::Status,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Wire key of the field.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::CampaignName => "campaignName",
            Self::PassType => "type",
            Self::BrandColor => "brandColor",
            Self::LogoUrl => "logoUrl",
            Self::Tagline => "tagline",
            Self::RewardDescription => "rewardDescription",
            Self::StampsNeeded => "stampsNeeded",
            Self::MinPurchase => "minPurchase",
            Self::BusinessName => "businessName",
            Self::BusinessAddress => "businessAddress",
            Self::Contact => "contact",
            Self::Email => "email",
            Self::Website => "website",
            Self::SocialMedia => "socialMedia",
            Self::WelcomeMessage => "welcomeMessage",
            Self::Instructions => "instructions",
            Self::SpecialOffers => "specialOffers",
            Self::OffersFrequency => "offersFrequency",
            Self::Status => "status",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Human-readable label used in error messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CampaignName => "Campaign name",
            Self::PassType => "Pass type",
            Self::BrandColor => "Brand color",
            Self::LogoUrl => "Logo URL",
            Self::Tagline => "Tagline",
            Self::RewardDescription => "Reward description",
            Self::StampsNeeded => "Stamps needed",
            Self::MinPurchase => "Minimum purchase",
            Self::BusinessName => "Business name",
            Self::BusinessAddress => "Business address",
            Self::Contact => "Contact",
            Self::Email => "Email",
            Self::Website => "Website",
            Self::SocialMedia => "Social media",
            Self::WelcomeMessage => "Welcome message",
            Self::Instructions => "Instructions",
            Self::SpecialOffers => "Special offers",
            Self::OffersFrequency => "Offers frequency",
            Self::Status => "Status",
            Self::CreatedAt => "Created at",
            Self::UpdatedAt => "Updated at",
        }
    }

    /// Maximum length in characters for free-text fields.
    #[must_use]
    pub const fn max_len(&self) -> Option<usize> {
        match self {
            Self::CampaignName | Self::BusinessName => Some(100),
            Self::Tagline => Some(200),
            Self::RewardDescription | Self::BusinessAddress | Self::SocialMedia => Some(500),
            Self::WelcomeMessage | Self::Instructions | Self::SpecialOffers => Some(1000),
            _ => None,
        }
    }

    /// Whether the field is bookkeeping that no mutator writes directly.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::Status | Self::CreatedAt | Self::UpdatedAt)
    }

    /// Look a field up by wire key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| format!("unknown field: {s}"))
    }
}
