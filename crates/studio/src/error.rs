//! Unified error handling with Sentry integration.
//!
//! Handlers return `Result<T, AppError>`. Server-side failures are captured to
//! Sentry before the response is built; client errors are not.
//!
//! Every error is rendered as JSON. Validation failures carry one entry per
//! rejected field:
//!
//! ```json
//! {
//!   "error": "Validation failed",
//!   "fields": [
//!     { "field": "stampsNeeded", "code": "out_of_range", "message": "Stamps needed must be between 1 and 20" }
//!   ]
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use passly_builder::{SavedPassError, StorageError};
use passly_core::{PayloadError, ValidationError, ValidationErrorBody};

/// Application-level error type for the studio.
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more draft fields were rejected.
    #[error("Validation failed: {} field(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The auth marker is missing.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Another writer changed the data first.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(vec![err])
    }
}

impl From<PayloadError> for AppError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::NotAnObject { .. } => Self::BadRequest(err.to_string()),
            PayloadError::Invalid(errors) => Self::Validation(errors),
        }
    }
}

impl From<SavedPassError> for AppError {
    fn from(err: SavedPassError) -> Self {
        match err {
            SavedPassError::NotFound(id) => Self::NotFound(format!("saved pass {id}")),
            SavedPassError::Conflict { .. } => Self::Conflict(err.to_string()),
            SavedPassError::Storage(e) => Self::Storage(e),
            SavedPassError::DataCorruption(_) | SavedPassError::Serialization(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ValidationErrorBody>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Storage(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let body = match self {
            Self::Storage(_) | Self::Internal(_) => ErrorBody {
                error: "Internal server error".to_string(),
                fields: Vec::new(),
            },
            Self::Validation(errors) => ErrorBody {
                error: "Validation failed".to_string(),
                fields: errors.iter().map(ValidationError::to_body).collect(),
            },
            other => ErrorBody {
                error: other.to_string(),
                fields: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
