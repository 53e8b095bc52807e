//! Integration tests for Passly.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p passly-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `draft_store` - Builder store, validation and persistence across reloads
//! - `saved_passes` - Saved-pass list and write policies on real files
//! - `wizard_steps` - Step navigation
//! - `studio_api` - The HTTP surface driven through the router
//!
//! Every test gets its own temporary storage directory, so tests can run in
//! parallel without sharing state.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use passly_builder::{FileStore, SavedPassList, SharedStorage, WritePolicy};
use passly_studio::{app, config::StudioConfig, state::AppState};

/// A throwaway storage directory.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a context backed by a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// A new handle onto the directory, as a fresh process would open it.
    #[must_use]
    pub fn storage(&self) -> SharedStorage {
        Arc::new(FileStore::new(self.dir.path()))
    }

    /// The saved-pass list under `policy`.
    #[must_use]
    pub fn saved(&self, policy: WritePolicy) -> SavedPassList {
        SavedPassList::new(self.storage(), policy)
    }

    /// The studio router over this directory.
    #[must_use]
    pub fn studio(&self, policy: WritePolicy) -> Router {
        let config = StudioConfig {
            data_dir: self.dir.path().to_path_buf(),
            saved_passes_policy: policy,
            ..StudioConfig::default()
        };
        app(AppState::with_storage(config, self.storage()))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Send one request through `router` and decode the JSON body.
///
/// Empty bodies decode to `Value::Null`.
///
/// # Panics
///
/// Panics if the request cannot be built or the body cannot be read.
/// Bodies that are not JSON come back as a string value.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Router is infallible");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, json)
}
