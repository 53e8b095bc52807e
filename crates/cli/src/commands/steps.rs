//! Wizard navigation lookup.

use passly_core::StepNavigation;
use serde_json::json;

use super::print_json;

/// Resolve a step slug or route path and print its navigation.
///
/// Anything containing a `/` is treated as a route path, so the locale
/// segment is honored. Unknown steps resolve to the first step.
///
/// # Errors
///
/// Returns an error if the output cannot be serialized.
pub fn show(target: &str) -> Result<(), serde_json::Error> {
    let nav = resolve(target);
    tracing::debug!(input = target, step = %nav.current, "Resolved step");

    print_json(&json!({
        "navigation": nav,
        "href": nav.href(),
        "previousHref": nav.previous_href(),
        "nextHref": nav.next_href(),
        "continueLabel": nav.continue_label(),
    }))
}

fn resolve(target: &str) -> StepNavigation {
    if target.contains('/') {
        StepNavigation::from_path(target)
    } else {
        StepNavigation::for_slug(target)
    }
}

#[cfg(test)]
mod tests {
    use passly_core::{Locale, WizardStep};

    use super::*;

    #[test]
    fn test_resolve_slug_and_path() {
        let nav = resolve("business");
        assert_eq!(nav.current, WizardStep::Business);
        assert_eq!(nav.locale, Locale::En);

        let nav = resolve("/de/create-new-pass/publish");
        assert_eq!(nav.current, WizardStep::Publish);
        assert_eq!(nav.locale, Locale::De);
        assert!(nav.is_last);
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        let nav = resolve("unknown");
        assert_eq!(nav.current, WizardStep::PassType);
        assert!(nav.previous.is_none());
    }
}
