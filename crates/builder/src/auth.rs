//! Authentication marker.
//!
//! Sign-in is a stub: the marker key is written with the entered email and
//! its mere presence unlocks the wizard. There is no token, no expiry and
//! no credential check.

use crate::storage::{SharedStorage, StorageError, keys};

/// Presence check over the [`keys::AUTH_MARKER`] key.
#[derive(Clone)]
pub struct AuthMarker {
    storage: SharedStorage,
}

impl AuthMarker {
    /// Create a marker over `storage`.
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Write the marker.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the marker cannot be written.
    #[tracing::instrument(skip(self))]
    pub fn sign_in(&self, email: &str) -> Result<(), StorageError> {
        self.storage.set(keys::AUTH_MARKER, email)?;
        tracing::info!("Signed in");
        Ok(())
    }

    /// Remove the marker.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the marker cannot be removed.
    #[tracing::instrument(skip(self))]
    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.storage.remove(keys::AUTH_MARKER)?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Whether the marker is present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if storage cannot be read.
    pub fn is_signed_in(&self) -> Result<bool, StorageError> {
        Ok(self.storage.get(keys::AUTH_MARKER)?.is_some())
    }

    /// The value stored in the marker, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if storage cannot be read.
    pub fn signed_in_as(&self) -> Result<Option<String>, StorageError> {
        self.storage.get(keys::AUTH_MARKER)
    }
}

impl std::fmt::Debug for AuthMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthMarker").finish_non_exhaustive()
    }
}
