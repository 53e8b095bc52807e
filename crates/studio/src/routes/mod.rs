//! HTTP route handlers for the studio.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                        - Health check
//!
//! # Auth (stub, no credentials)
//! POST   /auth/login                    - Write the auth marker ({ "email": ... })
//! POST   /auth/logout                   - Remove the auth marker
//! GET    /auth/status                   - Whether the marker is present
//!
//! # Wizard navigation
//! GET    /api/steps/{slug}              - Previous/next/progress for a step (?locale=de)
//!
//! # Draft (requires auth)
//! GET    /api/builder/draft             - Current draft
//! PATCH  /api/builder/draft             - Strict all-or-nothing field update
//! POST   /api/builder/draft/hydrate     - Lenient merge of a snapshot
//! POST   /api/builder/draft/reset       - Restore the default snapshot
//! POST   /api/builder/draft/publish     - Mark the draft published
//! POST   /api/builder/draft/archive     - Mark the draft archived
//!
//! # Saved passes (requires auth)
//! GET    /api/passes                    - Saved list, oldest first
//! POST   /api/passes/drafts             - Save the current draft as a draft record
//! POST   /api/passes/published          - Save the current draft as a published record
//! POST   /api/passes/{id}/toggle        - Flip draft/published
//! DELETE /api/passes/{id}               - Remove a record
//! ```

pub mod auth;
pub mod builder;
pub mod passes;
pub mod steps;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/status", get(auth::status))
}

/// Create the draft routes router.
pub fn builder_routes() -> Router<AppState> {
    Router::new()
        .route("/draft", get(builder::show).patch(builder::patch))
        .route("/draft/hydrate", post(builder::hydrate))
        .route("/draft/reset", post(builder::reset))
        .route("/draft/publish", post(builder::publish))
        .route("/draft/archive", post(builder::archive))
}

/// Create the saved-pass routes router.
pub fn pass_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(passes::index))
        .route("/drafts", post(passes::save_draft))
        .route("/published", post(passes::publish))
        .route("/{id}/toggle", post(passes::toggle))
        .route("/{id}", axum::routing::delete(passes::delete))
}

/// Create all routes for the studio.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .route("/api/steps/{slug}", get(steps::show))
        .nest("/api/builder", builder_routes())
        .nest("/api/passes", pass_routes())
}
