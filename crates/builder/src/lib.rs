//! Passly Builder - state, storage and saved passes for the pass wizard.
//!
//! # Modules
//!
//! - [`store`] - The Builder State Store holding the in-progress draft
//! - [`storage`] - Key-value storage trait with memory and file backends
//! - [`persistence`] - Listener that snapshots the draft after each change
//! - [`auth`] - Presence-only authentication marker
//! - [`saved`] - The saved-pass list repository
//!
//! # Example
//!
//! ```
//! use passly_builder::persistence::open_store;
//! use passly_builder::storage::MemoryStore;
//!
//! let storage = MemoryStore::shared();
//! let (mut store, _subscription) = open_store(storage.clone());
//! store.set_campaign_name("Summer Coffee Lovers").unwrap();
//!
//! let reloaded = passly_builder::persistence::load_draft(storage.as_ref());
//! assert_eq!(reloaded.fields().campaign_name, "Summer Coffee Lovers");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod persistence;
pub mod saved;
pub mod storage;
pub mod store;

pub use auth::AuthMarker;
pub use persistence::{PersistError, load_draft, open_store, persist_on_change};
pub use saved::{
    SavedPassError, SavedPassList, SavedPassRecord, SavedPassState, SavedPasses, WritePolicy,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStorage, StorageError};
pub use store::{BuilderStore, SubscriptionId};
