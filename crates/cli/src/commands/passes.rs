//! Saved-pass list commands.

use passly_builder::{SavedPassError, SavedPassList, SharedStorage, WritePolicy, load_draft};
use passly_core::SavedPassId;
use thiserror::Error;
use tracing::info;

use super::print_json;

/// Errors that can occur while managing saved passes.
#[derive(Debug, Error)]
pub enum PassesError {
    /// Id argument is not a number.
    #[error("Invalid saved pass id: {0}")]
    InvalidId(String),

    /// Saved-pass repository error.
    #[error(transparent)]
    Saved(#[from] SavedPassError),

    /// Output could not be printed.
    #[error("Failed to encode saved passes: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Saved-pass commands bound to one storage directory.
pub struct Passes {
    storage: SharedStorage,
    list: SavedPassList,
}

impl Passes {
    /// Open the saved-pass list with the given write policy.
    pub fn new(storage: SharedStorage, policy: WritePolicy) -> Self {
        Self {
            list: SavedPassList::new(storage.clone(), policy),
            storage,
        }
    }

    /// Print every record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be read.
    pub fn list(&self) -> Result<(), PassesError> {
        let records = self.list.list()?;
        info!(count = records.len(), "Loaded saved passes");
        print_json(&records)?;
        Ok(())
    }

    /// Save the stored draft as a draft record.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be read or written.
    pub fn save_draft(&self) -> Result<(), PassesError> {
        let draft = load_draft(self.storage.as_ref());
        let record = self.list.save_draft(&draft)?;
        info!(id = %record.id, "Saved draft");
        Ok(())
    }

    /// Save the stored draft as a published record.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be read or written.
    pub fn publish(&self) -> Result<(), PassesError> {
        let draft = load_draft(self.storage.as_ref());
        let record = self.list.publish(&draft)?;
        info!(id = %record.id, "Published pass");
        Ok(())
    }

    /// Flip a record between draft and published.
    ///
    /// # Errors
    ///
    /// Returns `PassesError::InvalidId` for malformed ids and
    /// `SavedPassError::NotFound` for ids not in the list.
    pub fn toggle(&self, raw: &str) -> Result<(), PassesError> {
        let record = self.list.toggle_status(parse_id(raw)?)?;
        info!(id = %record.id, status = %record.status(), "Toggled pass");
        Ok(())
    }

    /// Remove a record.
    ///
    /// # Errors
    ///
    /// Returns `PassesError::InvalidId` for malformed ids and
    /// `SavedPassError::NotFound` for ids not in the list.
    pub fn delete(&self, raw: &str) -> Result<(), PassesError> {
        let id = parse_id(raw)?;
        self.list.delete(id)?;
        info!(id = %id, "Deleted pass");
        Ok(())
    }
}

fn parse_id(raw: &str) -> Result<SavedPassId, PassesError> {
    raw.trim()
        .parse()
        .map_err(|_| PassesError::InvalidId(raw.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use passly_builder::{FileStore, open_store};
    use passly_core::PassStatus;

    use super::*;

    fn passes(dir: &tempfile::TempDir) -> Passes {
        Passes::new(
            Arc::new(FileStore::new(dir.path())),
            WritePolicy::LastWriterWins,
        )
    }

    #[test]
    fn test_save_uses_stored_draft() {
        let dir = tempfile::tempdir().unwrap();
        {
            let (mut store, _subscription) = open_store(Arc::new(FileStore::new(dir.path())));
            store.set_campaign_name("Brew Club").unwrap();
        }

        passes(&dir).save_draft().unwrap();
        passes(&dir).publish().unwrap();

        let records = passes(&dir).list.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data.campaign_name, "Brew Club");
        assert_eq!(records[0].status(), PassStatus::Draft);
        assert_eq!(records[1].status(), PassStatus::Published);
    }

    #[test]
    fn test_toggle_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        passes(&dir).save_draft().unwrap();
        let id = passes(&dir).list.list().unwrap()[0].id.to_string();

        passes(&dir).toggle(&id).unwrap();
        let records = passes(&dir).list.list().unwrap();
        assert_eq!(records[0].status(), PassStatus::Published);

        passes(&dir).delete(&id).unwrap();
        assert!(passes(&dir).list.list().unwrap().is_empty());

        let err = passes(&dir).delete(&id).unwrap_err();
        assert!(matches!(err, PassesError::Saved(SavedPassError::NotFound(_))));
    }

    #[test]
    fn test_invalid_id() {
        let dir = tempfile::tempdir().unwrap();
        let err = passes(&dir).toggle("abc").unwrap_err();
        assert!(matches!(err, PassesError::InvalidId(raw) if raw == "abc"));
    }
}
