//! Integration tests for wizard step navigation.

use passly_core::{Locale, StepNavigation, WizardStep};

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
fn test_unknown_step_behaves_as_first() {
    for slug in ["", "nowhere", "Pass-Type", "create-new-pass"] {
        let nav = StepNavigation::for_slug(slug);
        assert_eq!(nav.current, WizardStep::PassType, "{slug:?}");
        assert_eq!(nav.index, 0);
        assert!(nav.previous.is_none());
        assert_eq!(nav.next, WizardStep::Branding);
        assert_eq!(nav.progress_percent, 14);
    }
}

#[test]
fn test_progress_over_all_steps() {
    let percents: Vec<u8> = WizardStep::ALL
        .iter()
        .map(|step| StepNavigation::for_step(*step, Locale::En).progress_percent)
        .collect();
    assert_eq!(percents, vec![14, 29, 43, 57, 71, 86, 100]);
}

#[test]
fn test_last_step_clamps_next() {
    let nav = StepNavigation::for_slug("publish");
    assert_eq!(nav.next, WizardStep::Publish);
    assert!(nav.is_last);
    assert_eq!(nav.continue_label(), "Publish Pass");
}

#[test]
fn test_path_with_locale() {
    let nav = StepNavigation::from_path("/de/create-new-pass/distribution");
    assert_eq!(nav.current, WizardStep::Distribution);
    assert_eq!(nav.locale, Locale::De);
    assert_eq!(nav.href(), "/de/create-new-pass/distribution");
    assert_eq!(
        nav.previous_href().as_deref(),
        Some("/de/create-new-pass/experience")
    );
    assert_eq!(nav.next_href(), "/de/create-new-pass/publish");

    let nav = StepNavigation::from_path("/create-new-pass");
    assert_eq!(nav.current, WizardStep::PassType);
    assert_eq!(nav.locale, Locale::En);
}
