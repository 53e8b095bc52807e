//! Auth marker commands.
//!
//! The marker is presence-only; the email is kept for display.

use passly_builder::{AuthMarker, SharedStorage, StorageError};
use tracing::info;

/// Write the auth marker.
///
/// # Errors
///
/// Returns an error if the marker cannot be written.
pub fn login(storage: SharedStorage, email: &str) -> Result<(), StorageError> {
    AuthMarker::new(storage).sign_in(email)
}

/// Remove the auth marker.
///
/// # Errors
///
/// Returns an error if the marker cannot be removed.
pub fn logout(storage: SharedStorage) -> Result<(), StorageError> {
    AuthMarker::new(storage).sign_out()
}

/// Report whether the marker is present.
///
/// # Errors
///
/// Returns an error if the marker cannot be read.
pub fn status(storage: SharedStorage) -> Result<(), StorageError> {
    match AuthMarker::new(storage).signed_in_as()? {
        Some(email) => info!(email = %email, "Signed in"),
        None => info!("Not signed in"),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use passly_builder::MemoryStore;

    use super::*;

    #[test]
    fn test_login_logout() {
        let storage = MemoryStore::shared();

        login(storage.clone(), "owner@example.com").unwrap();
        assert!(AuthMarker::new(storage.clone()).is_signed_in().unwrap());
        status(storage.clone()).unwrap();

        logout(storage.clone()).unwrap();
        assert!(!AuthMarker::new(storage).is_signed_in().unwrap());
    }
}
