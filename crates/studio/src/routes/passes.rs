//! Saved-pass list endpoints.
//!
//! The list is read and rewritten with blocking file I/O, so each operation
//! runs on the blocking pool rather than the request task.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use passly_builder::{SavedPassError, SavedPassList, SavedPassRecord};
use passly_core::SavedPassId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

fn parse_id(raw: &str) -> Result<SavedPassId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid saved pass id: {raw}")))
}

/// Run a saved-list operation on the blocking pool.
async fn blocking<T, F>(saved: &SavedPassList, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&SavedPassList) -> std::result::Result<T, SavedPassError> + Send + 'static,
{
    let saved = saved.clone();
    let outcome = tokio::task::spawn_blocking(move || op(&saved))
        .await
        .map_err(|e| AppError::Internal(format!("saved pass task failed: {e}")))?;
    Ok(outcome?)
}

/// `GET /api/passes`
pub async fn index(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> Result<Json<Vec<SavedPassRecord>>> {
    Ok(Json(blocking(state.saved(), SavedPassList::list).await?))
}

/// `POST /api/passes/drafts`
///
/// Saves the current draft's fields as a new draft record.
#[tracing::instrument(skip_all)]
pub async fn save_draft(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> Result<(StatusCode, Json<SavedPassRecord>)> {
    let draft = state.store().lock().await.draft().clone();
    let record = blocking(state.saved(), move |saved| saved.save_draft(&draft)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `POST /api/passes/published`
///
/// Saves the current draft's fields as a new published record.
#[tracing::instrument(skip_all)]
pub async fn publish(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> Result<(StatusCode, Json<SavedPassRecord>)> {
    let draft = state.store().lock().await.draft().clone();
    let record = blocking(state.saved(), move |saved| saved.publish(&draft)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `POST /api/passes/{id}/toggle`
#[tracing::instrument(skip(state, _auth))]
pub async fn toggle(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<SavedPassRecord>> {
    let id = parse_id(&id)?;
    let record = blocking(state.saved(), move |saved| saved.toggle_status(id)).await?;
    Ok(Json(record))
}

/// `DELETE /api/passes/{id}`
#[tracing::instrument(skip(state, _auth))]
pub async fn delete(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    blocking(state.saved(), move |saved| saved.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
