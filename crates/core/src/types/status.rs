//! Enumerations for pass attributes and lifecycle.

use serde::{Deserialize, Serialize};

/// Wallet pass category.
///
/// Mirrors the pass styles a wallet app can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PassCategory {
    /// Store card (loyalty stamps, points).
    #[default]
    Store,
    Coupon,
    Event,
    Boarding,
    Generic,
}

impl PassCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Store,
        Self::Coupon,
        Self::Event,
        Self::Boarding,
        Self::Generic,
    ];

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Coupon => "coupon",
            Self::Event => "event",
            Self::Boarding => "boarding",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for PassCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PassCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("invalid pass type: {s}"))
    }
}

/// How often special offers are pushed to pass holders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OffersFrequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Never,
}

impl std::fmt::Display for OffersFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Never => write!(f, "Never"),
        }
    }
}

impl std::str::FromStr for OffersFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Daily" => Ok(Self::Daily),
            "Weekly" => Ok(Self::Weekly),
            "Monthly" => Ok(Self::Monthly),
            "Never" => Ok(Self::Never),
            _ => Err(format!("invalid offers frequency: {s}")),
        }
    }
}

/// Lifecycle status of the pass being built.
///
/// `publish` and `archive` simply overwrite this value; no transition is
/// ever refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PassStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl std::fmt::Display for PassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// UI locale used to build wizard links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    /// Path prefix of the locale.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            _ => Err(format!("unsupported locale: {s}")),
        }
    }
}
