//! Draft editing endpoints.
//!
//! All handlers require the auth marker and run their mutation while holding
//! the store lock. Persistence happens through the store's listener, which
//! writes one small snapshot file synchronously before the lock is released.
//! That keeps edits and their snapshots in the same order; the cost is a
//! short blocking write on the request task.

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value;

use passly_core::{DraftField, PassDraft, ValidationError, ValidationErrorBody};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Draft plus the fields a patch changed.
#[derive(Debug, Serialize)]
pub struct PatchResponse {
    pub draft: PassDraft,
    pub applied: Vec<DraftField>,
}

/// Draft plus what a hydrate did with each key.
#[derive(Debug, Serialize)]
pub struct HydrateResponse {
    pub draft: PassDraft,
    pub applied: Vec<DraftField>,
    pub ignored: Vec<String>,
    pub rejected: Vec<ValidationErrorBody>,
}

/// `GET /api/builder/draft`
pub async fn show(State(state): State<AppState>, _auth: RequireAuth) -> Json<PassDraft> {
    let store = state.store().lock().await;
    Json(store.draft().clone())
}

/// `PATCH /api/builder/draft`
///
/// Every recognized key must validate; otherwise nothing is applied and the
/// response lists each rejected field.
#[tracing::instrument(skip_all)]
pub async fn patch(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Json(payload): Json<Value>,
) -> Result<Json<PatchResponse>> {
    let mut store = state.store().lock().await;
    let applied = store.apply_patch(&payload)?;
    tracing::info!(fields = applied.len(), "Patched draft");

    Ok(Json(PatchResponse {
        draft: store.draft().clone(),
        applied,
    }))
}

/// `POST /api/builder/draft/hydrate`
///
/// Lenient merge: unknown keys are ignored and invalid values are skipped.
#[tracing::instrument(skip_all)]
pub async fn hydrate(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Json(payload): Json<Value>,
) -> Result<Json<HydrateResponse>> {
    let mut store = state.store().lock().await;
    let report = store.hydrate(&payload)?;
    tracing::info!(
        applied = report.applied.len(),
        ignored = report.ignored.len(),
        rejected = report.rejected.len(),
        "Hydrated draft"
    );

    Ok(Json(HydrateResponse {
        draft: store.draft().clone(),
        rejected: report.rejected.iter().map(ValidationError::to_body).collect(),
        applied: report.applied,
        ignored: report.ignored,
    }))
}

/// `POST /api/builder/draft/reset`
#[tracing::instrument(skip_all)]
pub async fn reset(State(state): State<AppState>, _auth: RequireAuth) -> Json<PassDraft> {
    let mut store = state.store().lock().await;
    store.clear();
    tracing::info!("Reset draft");
    Json(store.draft().clone())
}

/// `POST /api/builder/draft/publish`
#[tracing::instrument(skip_all)]
pub async fn publish(State(state): State<AppState>, _auth: RequireAuth) -> Json<PassDraft> {
    let mut store = state.store().lock().await;
    store.publish();
    Json(store.draft().clone())
}

/// `POST /api/builder/draft/archive`
#[tracing::instrument(skip_all)]
pub async fn archive(State(state): State<AppState>, _auth: RequireAuth) -> Json<PassDraft> {
    let mut store = state.store().lock().await;
    store.archive();
    Json(store.draft().clone())
}
