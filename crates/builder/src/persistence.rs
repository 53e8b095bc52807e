//! Wiring between the store and storage.
//!
//! The draft is written in full under [`keys::BUILDER_STATE`] after every
//! successful change. Writes are fire-and-forget: a failure is logged and the
//! in-memory state stays authoritative.

use passly_core::{PassDraft, PayloadError};

use crate::storage::{KeyValueStore, SharedStorage, StorageError, keys};
use crate::store::{BuilderStore, SubscriptionId};

/// Errors from reading or writing the draft snapshot.
#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("snapshot is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("snapshot rejected: {0}")]
    Payload(#[from] PayloadError),
}

/// Serialize `draft` under the draft key.
///
/// # Errors
///
/// Returns `PersistError` if serialization or the storage write fails.
pub fn save_draft(storage: &dyn KeyValueStore, draft: &PassDraft) -> Result<(), PersistError> {
    let snapshot = serde_json::to_string(draft)?;
    storage.set(keys::BUILDER_STATE, &snapshot)?;
    Ok(())
}

/// Listener that persists the draft after each change.
///
/// Register it with [`BuilderStore::subscribe`]. Failures are logged with
/// `warn` and otherwise ignored.
pub fn persist_on_change(storage: SharedStorage) -> impl Fn(&PassDraft) + Send + Sync + 'static {
    move |draft| {
        if let Err(e) = save_draft(storage.as_ref(), draft) {
            tracing::warn!(error = %e, key = keys::BUILDER_STATE, "Failed to persist builder state");
        }
    }
}

/// Read the persisted snapshot.
///
/// Returns `Ok(None)` if nothing has been stored yet. Fields in the snapshot
/// that no longer validate are skipped and logged, keeping their defaults.
///
/// # Errors
///
/// Returns `PersistError` if storage cannot be read or the snapshot is not a
/// JSON object.
pub fn try_load_draft(storage: &dyn KeyValueStore) -> Result<Option<PassDraft>, PersistError> {
    let Some(raw) = storage.get(keys::BUILDER_STATE)? else {
        return Ok(None);
    };

    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let mut draft = PassDraft::default();
    let report = draft.hydrate(&value)?;

    for rejected in &report.rejected {
        tracing::warn!(
            field = rejected.field.key(),
            code = rejected.code(),
            "Ignoring invalid value in persisted snapshot: {rejected}"
        );
    }
    if !report.ignored.is_empty() {
        tracing::debug!(keys = ?report.ignored, "Ignoring unknown keys in persisted snapshot");
    }

    Ok(Some(draft))
}

/// Read the persisted snapshot, falling back to defaults.
///
/// A missing snapshot yields the default draft. An unreadable or corrupt one
/// is logged and also yields the default draft.
#[must_use]
pub fn load_draft(storage: &dyn KeyValueStore) -> PassDraft {
    match try_load_draft(storage) {
        Ok(Some(draft)) => draft,
        Ok(None) => PassDraft::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable builder state");
            PassDraft::default()
        }
    }
}

/// Build a store from the persisted snapshot with persistence attached.
#[must_use]
pub fn open_store(storage: SharedStorage) -> (BuilderStore, SubscriptionId) {
    let mut store = BuilderStore::with_draft(load_draft(storage.as_ref()));
    let subscription = store.subscribe(persist_on_change(storage));
    (store, subscription)
}
