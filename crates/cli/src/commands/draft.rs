//! Draft commands.
//!
//! Every mutation loads the stored draft into a [`BuilderStore`], applies the
//! change and saves the snapshot explicitly, so a failed write fails the
//! command.

use std::path::Path;

use passly_builder::persistence::save_draft;
use passly_builder::{BuilderStore, PersistError, SharedStorage, load_draft};
use passly_core::{DraftField, PayloadError, ValidationError};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::print_json;

/// Errors that can occur while editing the draft.
#[derive(Debug, Error)]
pub enum DraftError {
    /// Field key is not part of the draft.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// `--json` value did not parse.
    #[error("Invalid JSON value: {0}")]
    InvalidValue(#[source] serde_json::Error),

    /// Field rejected the value.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Snapshot file is not an object.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Snapshot file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON.
    #[error("Invalid JSON in {path}: {source}")]
    Snapshot {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot could not be saved.
    #[error("Failed to save draft: {0}")]
    Persist(#[from] PersistError),

    /// Draft could not be printed.
    #[error("Failed to encode draft: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Print the stored draft, or the defaults when nothing is stored.
///
/// # Errors
///
/// Returns an error if the draft cannot be serialized.
pub fn show(storage: &SharedStorage) -> Result<(), DraftError> {
    let draft = load_draft(storage.as_ref());
    print_json(&draft)?;
    Ok(())
}

fn open(storage: &SharedStorage) -> BuilderStore {
    BuilderStore::with_draft(load_draft(storage.as_ref()))
}

fn save(storage: &SharedStorage, store: &BuilderStore) -> Result<(), DraftError> {
    save_draft(storage.as_ref(), store.draft())?;
    Ok(())
}

/// Turn the raw command-line value into the JSON the field decoder expects.
fn parse_value(raw: Option<&str>, json: bool) -> Result<Value, DraftError> {
    match raw {
        None => Ok(Value::Null),
        Some(raw) if json => serde_json::from_str(raw).map_err(DraftError::InvalidValue),
        Some(raw) => Ok(Value::String(raw.to_owned())),
    }
}

/// Set a single field by its wire key.
///
/// # Errors
///
/// Returns `DraftError::UnknownField` for keys outside the draft and
/// `DraftError::Validation` if the field rejects the value. The stored draft
/// is left untouched on error. Returns `DraftError::Persist` if the draft
/// cannot be saved.
pub fn set(
    storage: SharedStorage,
    key: &str,
    raw: Option<&str>,
    json: bool,
) -> Result<(), DraftError> {
    let field = DraftField::from_key(key).ok_or_else(|| DraftError::UnknownField(key.to_owned()))?;
    let value = parse_value(raw, json)?;

    let mut store = open(&storage);
    store.set_field(field, &value)?;
    save(&storage, &store)?;

    info!(field = field.key(), "Updated draft");
    Ok(())
}

/// Merge a snapshot file into the draft.
///
/// Unknown keys are ignored and invalid values are skipped; both are logged.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not JSON, is not an
/// object, or the result cannot be saved.
pub fn hydrate(storage: SharedStorage, path: &Path) -> Result<(), DraftError> {
    let shown = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| DraftError::Read {
        path: shown.clone(),
        source,
    })?;
    let payload: Value = serde_json::from_str(&raw).map_err(|source| DraftError::Snapshot {
        path: shown.clone(),
        source,
    })?;

    let mut store = open(&storage);
    let report = store.hydrate(&payload)?;
    save(&storage, &store)?;

    for key in &report.ignored {
        warn!(key = %key, "Ignored unknown key");
    }
    for err in &report.rejected {
        warn!(field = err.field.key(), code = err.code(), "Skipped invalid value: {err}");
    }
    info!(
        path = %shown,
        applied = report.applied.len(),
        "Hydrated draft"
    );
    Ok(())
}

/// Restore the default draft.
///
/// # Errors
///
/// Returns `DraftError::Persist` if the draft cannot be saved.
pub fn reset(storage: SharedStorage) -> Result<(), DraftError> {
    let mut store = open(&storage);
    store.clear();
    save(&storage, &store)?;
    info!("Reset draft");
    Ok(())
}

/// Mark the draft published.
///
/// # Errors
///
/// Returns `DraftError::Persist` if the draft cannot be saved.
pub fn publish(storage: SharedStorage) -> Result<(), DraftError> {
    let mut store = open(&storage);
    store.publish();
    save(&storage, &store)?;
    info!("Published draft");
    Ok(())
}

/// Mark the draft archived.
///
/// # Errors
///
/// Returns `DraftError::Persist` if the draft cannot be saved.
pub fn archive(storage: SharedStorage) -> Result<(), DraftError> {
    let mut store = open(&storage);
    store.archive();
    save(&storage, &store)?;
    info!("Archived draft");
    Ok(())
}
