//! Wizard navigation.

use axum::{
    Json,
    extract::{Path, Query},
};
use serde::{Deserialize, Serialize};

use passly_core::{Locale, StepNavigation, WizardStep};

/// Optional query parameters for step lookups.
#[derive(Debug, Default, Deserialize)]
pub struct StepQuery {
    #[serde(default)]
    pub locale: Locale,
}

/// A step in the step bar.
#[derive(Debug, Serialize)]
pub struct StepSummary {
    pub slug: &'static str,
    pub label: &'static str,
    pub href: String,
}

/// Navigation for the requested step.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    #[serde(flatten)]
    pub navigation: StepNavigation,
    pub href: String,
    pub previous_href: Option<String>,
    pub next_href: String,
    pub continue_label: &'static str,
    pub steps: Vec<StepSummary>,
}

impl StepResponse {
    fn new(navigation: StepNavigation) -> Self {
        let steps = WizardStep::ALL
            .iter()
            .map(|step| StepSummary {
                slug: step.slug(),
                label: step.label(),
                href: step.href(navigation.locale),
            })
            .collect();

        Self {
            href: navigation.href(),
            previous_href: navigation.previous_href(),
            next_href: navigation.next_href(),
            continue_label: navigation.continue_label(),
            steps,
            navigation,
        }
    }
}

/// `GET /api/steps/{slug}`
///
/// Unknown slugs resolve to the first step.
pub async fn show(Path(slug): Path<String>, Query(query): Query<StepQuery>) -> Json<StepResponse> {
    let navigation = StepNavigation::for_step(
        WizardStep::from_slug(&slug).unwrap_or(WizardStep::PassType),
        query.locale,
    );
    Json(StepResponse::new(navigation))
}
