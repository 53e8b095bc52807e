//! The saved-pass list.
//!
//! Finished drafts are kept as a JSON array under [`keys::SAVED_PASSES`].
//! In memory the list is a map keyed by [`SavedPassId`]; every operation
//! loads the whole list, changes it and writes the whole list back.
//!
//! # Concurrent writers
//!
//! Two writers that load the list, change it and commit in turn will lose
//! the first writer's change. [`WritePolicy`] decides what happens:
//!
//! - [`WritePolicy::LastWriterWins`] - the second commit silently overwrites
//! - [`WritePolicy::RejectStale`] - the second commit fails with
//!   [`SavedPassError::Conflict`] and writes nothing
//!
//! The version used for the check lives under
//! [`keys::SAVED_PASSES_VERSION`] and is bumped on every commit under either
//! policy.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use passly_core::{PassDraft, PassFields, PassStatus, SavedPassId};

use crate::storage::{SharedStorage, StorageError, keys};

/// Errors from saved-pass operations.
#[derive(thiserror::Error, Debug)]
pub enum SavedPassError {
    /// No record has the requested id.
    #[error("saved pass {0} not found")]
    NotFound(SavedPassId),

    /// Another writer committed since this list was loaded.
    #[error("saved passes changed since they were loaded (loaded version {loaded}, stored version {stored})")]
    Conflict {
        /// Version the list was loaded at.
        loaded: u64,
        /// Version currently in storage.
        stored: u64,
    },

    /// Stored data cannot be interpreted.
    #[error("saved pass data is corrupted: {0}")]
    DataCorruption(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize saved passes: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// How commits treat concurrent writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Later commits overwrite earlier ones without checks.
    #[default]
    LastWriterWins,
    /// Commits made from a stale load are refused.
    RejectStale,
}

impl WritePolicy {
    /// Configuration name of the policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LastWriterWins => "last-writer-wins",
            Self::RejectStale => "reject-stale",
        }
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-writer-wins" => Ok(Self::LastWriterWins),
            "reject-stale" => Ok(Self::RejectStale),
            _ => Err(format!(
                "unknown write policy '{s}' (expected last-writer-wins or reject-stale)"
            )),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// Status of a saved record together with the matching timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SavedPassState {
    Draft {
        #[serde(rename = "savedAt")]
        saved_at: DateTime<Utc>,
    },
    Published {
        #[serde(rename = "publishedAt")]
        published_at: DateTime<Utc>,
    },
}

impl SavedPassState {
    /// Lifecycle status of the record.
    #[must_use]
    pub const fn status(&self) -> PassStatus {
        match self {
            Self::Draft { .. } => PassStatus::Draft,
            Self::Published { .. } => PassStatus::Published,
        }
    }

    /// When the record entered its current status.
    #[must_use]
    pub const fn changed_at(&self) -> DateTime<Utc> {
        match self {
            Self::Draft { saved_at } => *saved_at,
            Self::Published { published_at } => *published_at,
        }
    }

    /// The other status, stamped with `now`.
    #[must_use]
    pub const fn toggled(&self, now: DateTime<Utc>) -> Self {
        match self {
            Self::Draft { .. } => Self::Published { published_at: now },
            Self::Published { .. } => Self::Draft { saved_at: now },
        }
    }
}

/// One entry of the saved-pass list.
///
/// Serialized as `{ id, status, savedAt | publishedAt, data }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPassRecord {
    pub id: SavedPassId,
    #[serde(flatten)]
    pub state: SavedPassState,
    pub data: PassFields,
}

impl SavedPassRecord {
    /// Lifecycle status of the record.
    #[must_use]
    pub const fn status(&self) -> PassStatus {
        self.state.status()
    }
}

// =============================================================================
// In-memory list
// =============================================================================

/// A loaded copy of the saved-pass list.
///
/// Changes are local until passed to [`SavedPassList::commit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedPasses {
    records: BTreeMap<SavedPassId, SavedPassRecord>,
    version: u64,
}

impl SavedPasses {
    /// Storage version this copy was loaded at.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Records ordered by id (oldest first).
    pub fn records(&self) -> impl Iterator<Item = &SavedPassRecord> {
        self.records.values()
    }

    /// Look up a record.
    #[must_use]
    pub fn get(&self, id: SavedPassId) -> Option<&SavedPassRecord> {
        self.records.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record in the given state.
    pub fn append(&mut self, data: PassFields, state: SavedPassState) -> &SavedPassRecord {
        let id = self.free_id(SavedPassId::from_timestamp(state.changed_at()));
        self.records
            .entry(id)
            .or_insert(SavedPassRecord { id, state, data })
    }

    /// Flip a record between draft and published, restamping it.
    ///
    /// # Errors
    ///
    /// Returns [`SavedPassError::NotFound`] if no record has `id`.
    pub fn toggle(
        &mut self,
        id: SavedPassId,
        now: DateTime<Utc>,
    ) -> Result<&SavedPassRecord, SavedPassError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(SavedPassError::NotFound(id))?;
        record.state = record.state.toggled(now);
        Ok(record)
    }

    /// Remove a record.
    ///
    /// # Errors
    ///
    /// Returns [`SavedPassError::NotFound`] if no record has `id`.
    pub fn remove(&mut self, id: SavedPassId) -> Result<SavedPassRecord, SavedPassError> {
        self.records.remove(&id).ok_or(SavedPassError::NotFound(id))
    }

    /// First id at or after `candidate` that is not taken.
    fn free_id(&self, candidate: SavedPassId) -> SavedPassId {
        let mut id = candidate;
        while self.records.contains_key(&id) {
            id = id.next();
        }
        id
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the saved-pass list.
#[derive(Clone)]
pub struct SavedPassList {
    storage: SharedStorage,
    policy: WritePolicy,
}

impl fmt::Debug for SavedPassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedPassList")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SavedPassList {
    /// Create a repository over `storage`.
    #[must_use]
    pub fn new(storage: SharedStorage, policy: WritePolicy) -> Self {
        Self { storage, policy }
    }

    /// Active write policy.
    #[must_use]
    pub const fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Load the list and its version.
    ///
    /// Entries that cannot be decoded are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `SavedPassError::Storage` if storage cannot be read and
    /// `SavedPassError::DataCorruption` if the stored list is not an array or
    /// the version is not a number.
    pub fn load(&self) -> Result<SavedPasses, SavedPassError> {
        let version = self.stored_version()?;

        let Some(raw) = self.storage.get(keys::SAVED_PASSES)? else {
            return Ok(SavedPasses {
                records: BTreeMap::new(),
                version,
            });
        };

        let entries: Vec<serde_json::Value> = serde_json::from_str(&raw).map_err(|e| {
            SavedPassError::DataCorruption(format!("saved passes are not a JSON array: {e}"))
        })?;

        let mut records = BTreeMap::new();
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<SavedPassRecord>(entry) {
                Ok(record) => {
                    if records.insert(record.id, record).is_some() {
                        tracing::warn!(index, "Duplicate saved pass id; keeping the later entry");
                    }
                }
                Err(e) => tracing::warn!(index, error = %e, "Skipping unreadable saved pass"),
            }
        }

        Ok(SavedPasses { records, version })
    }

    /// Write `passes` back to storage.
    ///
    /// Under [`WritePolicy::RejectStale`] the commit is refused if storage
    /// moved past the version `passes` was loaded at. On success `passes`
    /// carries the new version, so it can be changed and committed again.
    ///
    /// # Errors
    ///
    /// Returns `SavedPassError::Conflict` for stale commits under
    /// `RejectStale`, and storage or serialization errors otherwise.
    #[tracing::instrument(skip(self, passes), fields(policy = %self.policy, loaded = passes.version))]
    pub fn commit(&self, passes: &mut SavedPasses) -> Result<(), SavedPassError> {
        let stored = self.stored_version()?;
        if self.policy == WritePolicy::RejectStale && stored != passes.version {
            tracing::warn!(stored, "Refusing stale saved-pass commit");
            return Err(SavedPassError::Conflict {
                loaded: passes.version,
                stored,
            });
        }

        let records: Vec<&SavedPassRecord> = passes.records.values().collect();
        let json = serde_json::to_string(&records)?;
        let next = stored.wrapping_add(1);

        self.storage.set(keys::SAVED_PASSES, &json)?;
        self.storage
            .set(keys::SAVED_PASSES_VERSION, &next.to_string())?;
        passes.version = next;

        tracing::debug!(count = records.len(), version = next, "Committed saved passes");
        Ok(())
    }

    /// All records ordered by id.
    ///
    /// # Errors
    ///
    /// See [`SavedPassList::load`].
    pub fn list(&self) -> Result<Vec<SavedPassRecord>, SavedPassError> {
        Ok(self.load()?.records.into_values().collect())
    }

    /// Append the draft's fields as a saved draft.
    ///
    /// # Errors
    ///
    /// Returns storage, serialization or conflict errors.
    #[tracing::instrument(skip(self, draft))]
    pub fn save_draft(&self, draft: &PassDraft) -> Result<SavedPassRecord, SavedPassError> {
        self.append(
            draft,
            SavedPassState::Draft {
                saved_at: Utc::now(),
            },
        )
    }

    /// Append the draft's fields as a published pass.
    ///
    /// # Errors
    ///
    /// Returns storage, serialization or conflict errors.
    #[tracing::instrument(skip(self, draft))]
    pub fn publish(&self, draft: &PassDraft) -> Result<SavedPassRecord, SavedPassError> {
        self.append(
            draft,
            SavedPassState::Published {
                published_at: Utc::now(),
            },
        )
    }

    fn append(
        &self,
        draft: &PassDraft,
        state: SavedPassState,
    ) -> Result<SavedPassRecord, SavedPassError> {
        let mut passes = self.load()?;
        let record = passes.append(draft.fields().clone(), state).clone();
        self.commit(&mut passes)?;
        tracing::info!(id = %record.id, status = %record.status(), "Saved pass");
        Ok(record)
    }

    /// Flip a record between draft and published.
    ///
    /// # Errors
    ///
    /// Returns `SavedPassError::NotFound` if `id` is unknown, plus storage,
    /// serialization or conflict errors.
    #[tracing::instrument(skip(self))]
    pub fn toggle_status(&self, id: SavedPassId) -> Result<SavedPassRecord, SavedPassError> {
        let mut passes = self.load()?;
        let record = passes.toggle(id, Utc::now())?.clone();
        self.commit(&mut passes)?;
        tracing::info!(status = %record.status(), "Toggled saved pass");
        Ok(record)
    }

    /// Remove a record.
    ///
    /// # Errors
    ///
    /// Returns `SavedPassError::NotFound` if `id` is unknown, plus storage,
    /// serialization or conflict errors.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: SavedPassId) -> Result<(), SavedPassError> {
        let mut passes = self.load()?;
        passes.remove(id)?;
        self.commit(&mut passes)?;
        tracing::info!("Deleted saved pass");
        Ok(())
    }

    fn stored_version(&self) -> Result<u64, SavedPassError> {
        self.storage
            .get(keys::SAVED_PASSES_VERSION)?
            .map_or(Ok(0), |raw| {
                raw.trim().parse().map_err(|_| {
                    SavedPassError::DataCorruption(format!("invalid saved pass version '{raw}'"))
                })
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::storage::MemoryStore;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn draft_named(name: &str) -> PassDraft {
        let mut draft = PassDraft::default();
        draft.set_campaign_name(name).unwrap();
        draft
    }

    #[test]
    fn test_record_wire_format() {
        let record = SavedPassRecord {
            id: SavedPassId::new(1_700_000_000_000),
            state: SavedPassState::Published {
                published_at: at(1_700_000_000_000),
            },
            data: PassFields::default(),
        };
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["id"], "1700000000000");
        assert_eq!(value["status"], "published");
        assert!(value["publishedAt"].is_string());
        assert!(value.get("savedAt").is_none());
        assert_eq!(value["data"]["stampsNeeded"], 5);
        assert!(value["data"].get("status").is_none());

        let back: SavedPassRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_same_millisecond_ids_do_not_collide() {
        let mut passes = SavedPasses::default();
        let first = passes
            .append(PassFields::default(), SavedPassState::Draft { saved_at: at(5) })
            .id;
        let second = passes
            .append(PassFields::default(), SavedPassState::Draft { saved_at: at(5) })
            .id;

        assert_eq!(first, SavedPassId::new(5));
        assert_eq!(second, SavedPassId::new(6));
        assert_eq!(passes.len(), 2);
    }

    #[test]
    fn test_toggle_restamps() {
        let mut passes = SavedPasses::default();
        let id = passes
            .append(PassFields::default(), SavedPassState::Draft { saved_at: at(1) })
            .id;

        let record = passes.toggle(id, at(10)).unwrap();
        assert_eq!(record.state, SavedPassState::Published { published_at: at(10) });

        let record = passes.toggle(id, at(20)).unwrap();
        assert_eq!(record.state, SavedPassState::Draft { saved_at: at(20) });

        assert!(matches!(
            passes.toggle(SavedPassId::new(999), at(30)),
            Err(SavedPassError::NotFound(_))
        ));
    }

    #[test]
    fn test_append_draft_then_published_then_delete_draft() {
        let list = SavedPassList::new(MemoryStore::shared(), WritePolicy::default());

        let draft = list.save_draft(&draft_named("Draft one")).unwrap();
        let published = list.publish(&draft_named("Published one")).unwrap();
        assert_eq!(list.list().unwrap().len(), 2);

        list.delete(draft.id).unwrap();

        let remaining = list.list().unwrap();
        assert_eq!(remaining, vec![published]);
        assert_eq!(remaining[0].status(), PassStatus::Published);
    }

    #[test]
    fn test_missing_ids() {
        let list = SavedPassList::new(MemoryStore::shared(), WritePolicy::default());
        let id = SavedPassId::new(42);

        assert!(matches!(list.delete(id), Err(SavedPassError::NotFound(_))));
        assert!(matches!(
            list.toggle_status(id),
            Err(SavedPassError::NotFound(_))
        ));
    }

    #[test]
    fn test_toggle_status_persists() {
        let list = SavedPassList::new(MemoryStore::shared(), WritePolicy::default());
        let record = list.save_draft(&draft_named("Loyalty")).unwrap();

        let toggled = list.toggle_status(record.id).unwrap();
        assert_eq!(toggled.status(), PassStatus::Published);
        assert_eq!(list.list().unwrap()[0].status(), PassStatus::Published);
    }

    #[test]
    fn test_last_writer_wins() {
        let list = SavedPassList::new(MemoryStore::shared(), WritePolicy::LastWriterWins);
        let mut tab_a = list.load().unwrap();
        let mut tab_b = list.load().unwrap();

        tab_a.append(PassFields::default(), SavedPassState::Draft { saved_at: at(1) });
        tab_b.append(PassFields::default(), SavedPassState::Draft { saved_at: at(2) });

        list.commit(&mut tab_a).unwrap();
        list.commit(&mut tab_b).unwrap();

        let stored = list.list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, SavedPassId::new(2));
    }

    #[test]
    fn test_reject_stale() {
        let list = SavedPassList::new(MemoryStore::shared(), WritePolicy::RejectStale);
        let mut tab_a = list.load().unwrap();
        let mut tab_b = list.load().unwrap();

        tab_a.append(PassFields::default(), SavedPassState::Draft { saved_at: at(1) });
        tab_b.append(PassFields::default(), SavedPassState::Draft { saved_at: at(2) });

        list.commit(&mut tab_a).unwrap();
        assert!(matches!(
            list.commit(&mut tab_b),
            Err(SavedPassError::Conflict { loaded: 0, stored: 1 })
        ));

        let stored = list.list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, SavedPassId::new(1));

        // A committed copy can keep going.
        tab_a.append(PassFields::default(), SavedPassState::Draft { saved_at: at(3) });
        list.commit(&mut tab_a).unwrap();
        assert_eq!(list.list().unwrap().len(), 2);
    }

    #[test]
    fn test_skips_unreadable_entries() {
        let storage = MemoryStore::shared();
        let good = serde_json::to_value(SavedPassRecord {
            id: SavedPassId::new(7),
            state: SavedPassState::Draft { saved_at: at(7) },
            data: PassFields::default(),
        })
        .unwrap();
        storage
            .set(
                keys::SAVED_PASSES,
                &json!([good, { "id": "8", "status": "bogus" }]).to_string(),
            )
            .unwrap();

        let list = SavedPassList::new(storage, WritePolicy::default());
        let records = list.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, SavedPassId::new(7));
    }

    #[test]
    fn test_skips_entries_with_invalid_fields() {
        let storage = MemoryStore::shared();
        let good = serde_json::to_value(SavedPassRecord {
            id: SavedPassId::new(7),
            state: SavedPassState::Draft { saved_at: at(7) },
            data: PassFields::default(),
        })
        .unwrap();
        let mut bad = good.clone();
        bad["id"] = json!("8");
        bad["data"]["stampsNeeded"] = json!(0);
        bad["data"]["brandColor"] = json!("not-a-color");
        bad["data"]["email"] = json!("nope");
        bad["data"]["businessName"] = json!("x".repeat(5000));
        storage
            .set(keys::SAVED_PASSES, &json!([good, bad]).to_string())
            .unwrap();

        let list = SavedPassList::new(storage, WritePolicy::default());
        let records = list.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, SavedPassId::new(7));
        assert!(matches!(
            list.toggle_status(SavedPassId::new(8)),
            Err(SavedPassError::NotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_list() {
        let storage = MemoryStore::shared();
        storage.set(keys::SAVED_PASSES, "{}").unwrap();
        let list = SavedPassList::new(Arc::clone(&storage), WritePolicy::default());
        assert!(matches!(list.load(), Err(SavedPassError::DataCorruption(_))));

        storage.set(keys::SAVED_PASSES, "[]").unwrap();
        storage.set(keys::SAVED_PASSES_VERSION, "many").unwrap();
        assert!(matches!(list.load(), Err(SavedPassError::DataCorruption(_))));
    }

    #[test]
    fn test_write_policy_names() {
        assert_eq!(
            "reject-stale".parse::<WritePolicy>().unwrap(),
            WritePolicy::RejectStale
        );
        assert_eq!(WritePolicy::default().to_string(), "last-writer-wins");
        assert!("first-writer-wins".parse::<WritePolicy>().is_err());
    }
}
