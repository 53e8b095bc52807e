//! Authentication extractor.
//!
//! The wizard is gated on the presence of the auth marker in storage. There
//! is no session and no token: if the marker exists, the request passes.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires the auth marker.
///
/// Holds the value stored in the marker (the email entered at sign-in).
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(email): RequireAuth) -> String {
///     format!("Hello, {email}!")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub String);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.auth().signed_in_as()? {
            Some(email) => Ok(Self(email)),
            None => {
                tracing::debug!(path = %parts.uri.path(), "Rejected request without auth marker");
                Err(AppError::Unauthorized("sign in first".to_string()))
            }
        }
    }
}
