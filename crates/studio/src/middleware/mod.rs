//! HTTP middleware stack for the studio.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! Route-level auth is an extractor ([`RequireAuth`]) rather than a layer, so
//! public routes such as `/health` and `/api/steps/*` need no exemptions.

pub mod auth;
pub mod request_id;

pub use auth::RequireAuth;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
