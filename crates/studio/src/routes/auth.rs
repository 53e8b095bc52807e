//! Sign-in stubs.
//!
//! Login writes the auth marker, logout removes it. No credentials are
//! checked.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Current sign-in state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `POST /auth/login`
#[tracing::instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let email = form.email.trim();
    if email.is_empty() {
        return Err(AppError::BadRequest("email is required".to_string()));
    }

    state.auth().sign_in(email)?;

    Ok(Json(SessionResponse {
        signed_in: true,
        email: Some(email.to_string()),
    }))
}

/// `POST /auth/logout`
#[tracing::instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    state.auth().sign_out()?;

    Ok(Json(SessionResponse {
        signed_in: false,
        email: None,
    }))
}

/// `GET /auth/status`
pub async fn status(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    let email = state.auth().signed_in_as()?;

    Ok(Json(SessionResponse {
        signed_in: email.is_some(),
        email,
    }))
}
