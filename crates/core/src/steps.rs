//! The seven-step wizard sequencer.
//!
//! Steps are identified by their URL slug. Anything that does not name a
//! step falls back to the first one, so navigation never fails.

use serde::Serialize;

use crate::types::Locale;

/// One screen of the pass wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    PassType,
    Branding,
    Details,
    Business,
    Experience,
    Distribution,
    Publish,
}

impl WizardStep {
    /// Steps in wizard order.
    pub const ALL: [Self; 7] = [
        Self::PassType,
        Self::Branding,
        Self::Details,
        Self::Business,
        Self::Experience,
        Self::Distribution,
        Self::Publish,
    ];

    /// URL slug of the step.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::PassType => "pass-type",
            Self::Branding => "branding",
            Self::Details => "details",
            Self::Business => "business",
            Self::Experience => "experience",
            Self::Distribution => "distribution",
            Self::Publish => "publish",
        }
    }

    /// Heading shown in the step bar.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PassType => "Pass Type",
            Self::Branding => "Branding",
            Self::Details => "Details",
            Self::Business => "Business",
            Self::Experience => "Experience",
            Self::Distribution => "Distribution",
            Self::Publish => "Publish",
        }
    }

    /// Zero-based position in the wizard.
    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Look a step up by slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.slug() == slug)
    }

    /// Wizard link for this step.
    ///
    /// ```
    /// use passly_core::{Locale, WizardStep};
    ///
    /// assert_eq!(
    ///     WizardStep::Branding.href(Locale::De),
    ///     "/de/create-new-pass/branding"
    /// );
    /// ```
    #[must_use]
    pub fn href(&self, locale: Locale) -> String {
        format!("/{locale}/create-new-pass/{}", self.slug())
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| format!("unknown wizard step: {s}"))
    }
}

/// Where the user is in the wizard and where they can go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepNavigation {
    pub locale: Locale,
    pub current: WizardStep,
    pub index: usize,
    pub previous: Option<WizardStep>,
    pub next: WizardStep,
    pub progress_percent: u8,
    pub is_last: bool,
}

impl StepNavigation {
    /// Navigation for a step slug; unknown slugs land on the first step.
    ///
    /// ```
    /// use passly_core::{StepNavigation, WizardStep};
    ///
    /// let nav = StepNavigation::for_slug("business");
    /// assert_eq!(nav.previous, Some(WizardStep::Details));
    /// assert_eq!(nav.next, WizardStep::Experience);
    /// assert_eq!(nav.progress_percent, 57);
    /// ```
    #[must_use]
    pub fn for_slug(slug: &str) -> Self {
        Self::for_step(
            WizardStep::from_slug(slug).unwrap_or(WizardStep::PassType),
            Locale::default(),
        )
    }

    /// Navigation derived from a location path such as
    /// `/de/create-new-pass/details`.
    ///
    /// The first path segment that names a step wins. A leading `en` or `de`
    /// segment selects the locale.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();

        let locale = segments
            .peek()
            .and_then(|first| first.parse::<Locale>().ok())
            .unwrap_or_default();

        let step = segments
            .find_map(WizardStep::from_slug)
            .unwrap_or(WizardStep::PassType);

        Self::for_step(step, locale)
    }

    /// Navigation for a known step.
    #[must_use]
    pub fn for_step(step: WizardStep, locale: Locale) -> Self {
        let index = step.index();
        let last = WizardStep::ALL.len() - 1;

        Self {
            locale,
            current: step,
            index,
            previous: index
                .checked_sub(1)
                .and_then(|i| WizardStep::ALL.get(i).copied()),
            next: WizardStep::ALL.get(index + 1).copied().unwrap_or(step),
            progress_percent: progress_percent(index),
            is_last: index == last,
        }
    }

    /// Label of the forward button.
    #[must_use]
    pub const fn continue_label(&self) -> &'static str {
        if self.is_last { "Publish Pass" } else { "Continue" }
    }

    /// Link to the current step.
    #[must_use]
    pub fn href(&self) -> String {
        self.current.href(self.locale)
    }

    /// Link to the previous step, if any.
    #[must_use]
    pub fn previous_href(&self) -> Option<String> {
        self.previous.map(|step| step.href(self.locale))
    }

    /// Link to the next step.
    #[must_use]
    pub fn next_href(&self) -> String {
        self.next.href(self.locale)
    }
}

/// `round((index + 1) / 7 * 100)` in integer arithmetic.
#[allow(clippy::cast_possible_truncation)]
const fn progress_percent(index: usize) -> u8 {
    let steps = WizardStep::ALL.len();
    let position = index + 1;
    ((200 * position + steps) / (2 * steps)) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_slugs() {
        let slugs: Vec<_> = WizardStep::ALL.iter().map(WizardStep::slug).collect();
        assert_eq!(
            slugs,
            [
                "pass-type",
                "branding",
                "details",
                "business",
                "experience",
                "distribution",
                "publish"
            ]
        );
        for (i, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
        }
    }

    #[test]
    fn test_progress_values() {
        let percents: Vec<_> = WizardStep::ALL
            .iter()
            .map(|step| StepNavigation::for_slug(step.slug()).progress_percent)
            .collect();
        assert_eq!(percents, [14, 29, 43, 57, 71, 86, 100]);
    }

    #[test]
    fn test_business_step() {
        let nav = StepNavigation::for_slug("business");
        assert_eq!(nav.index, 3);
        assert_eq!(nav.previous, Some(WizardStep::Details));
        assert_eq!(nav.next, WizardStep::Experience);
        assert_eq!(nav.progress_percent, 57);
        assert_eq!(nav.continue_label(), "Continue");
    }

    #[test]
    fn test_unknown_slug_falls_back_to_first() {
        let nav = StepNavigation::for_slug("unknown");
        assert_eq!(nav.index, 0);
        assert_eq!(nav.current, WizardStep::PassType);
        assert_eq!(nav.previous, None);
        assert_eq!(nav.next, WizardStep::Branding);
        assert_eq!(nav.progress_percent, 14);
    }

    #[test]
    fn test_last_step_clamps() {
        let nav = StepNavigation::for_slug("publish");
        assert!(nav.is_last);
        assert_eq!(nav.next, WizardStep::Publish);
        assert_eq!(nav.continue_label(), "Publish Pass");
        assert_eq!(nav.progress_percent, 100);
    }

    #[test]
    fn test_neighbours_follow_order() {
        let locale = Locale::default();
        for (i, step) in WizardStep::ALL.iter().copied().enumerate() {
            let nav = StepNavigation::for_step(step, locale);
            assert_eq!(nav.previous, i.checked_sub(1).and_then(|p| WizardStep::ALL.get(p).copied()));
            let expected_next = WizardStep::ALL.get(i + 1).copied().unwrap_or(WizardStep::Publish);
            assert_eq!(nav.next, expected_next, "{step:?}");
        }
    }

    #[test]
    fn test_from_path() {
        let nav = StepNavigation::from_path("/de/create-new-pass/details");
        assert_eq!(nav.locale, Locale::De);
        assert_eq!(nav.current, WizardStep::Details);
        assert_eq!(nav.previous_href().unwrap(), "/de/create-new-pass/branding");
        assert_eq!(nav.next_href(), "/de/create-new-pass/business");

        let nav = StepNavigation::from_path("/create-new-pass/experience");
        assert_eq!(nav.locale, Locale::En);
        assert_eq!(nav.current, WizardStep::Experience);

        let nav = StepNavigation::from_path("/fr/somewhere/else");
        assert_eq!(nav.locale, Locale::En);
        assert_eq!(nav.current, WizardStep::PassType);
        assert_eq!(nav.href(), "/en/create-new-pass/pass-type");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("branding".parse::<WizardStep>().unwrap(), WizardStep::Branding);
        assert!("Branding".parse::<WizardStep>().is_err());
    }

    #[test]
    fn test_serializes_navigation() {
        let json = serde_json::to_value(StepNavigation::for_slug("details")).unwrap();
        assert_eq!(json["current"], "details");
        assert_eq!(json["previous"], "branding");
        assert_eq!(json["progressPercent"], 43);
        assert_eq!(json["isLast"], false);
    }
}
