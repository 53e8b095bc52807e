//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use passly_builder::{
    AuthMarker, BuilderStore, FileStore, SavedPassList, SharedStorage, open_store,
};

use crate::config::StudioConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The builder store sits behind
/// an async mutex: each request runs its mutation to completion while holding
/// the lock.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StudioConfig,
    store: Mutex<BuilderStore>,
    saved: SavedPassList,
    auth: AuthMarker,
}

impl AppState {
    /// Create state backed by a [`FileStore`] in the configured data
    /// directory.
    #[must_use]
    pub fn new(config: StudioConfig) -> Self {
        let storage: SharedStorage = Arc::new(FileStore::new(&config.data_dir));
        Self::with_storage(config, storage)
    }

    /// Create state over an explicit storage backend.
    ///
    /// The draft is restored from storage and a persistence listener is
    /// attached, so every successful change is written back.
    #[must_use]
    pub fn with_storage(config: StudioConfig, storage: SharedStorage) -> Self {
        let (store, _subscription) = open_store(Arc::clone(&storage));
        let saved = SavedPassList::new(Arc::clone(&storage), config.saved_passes_policy);
        let auth = AuthMarker::new(storage);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Mutex::new(store),
                saved,
                auth,
            }),
        }
    }

    /// Get a reference to the studio configuration.
    #[must_use]
    pub fn config(&self) -> &StudioConfig {
        &self.inner.config
    }

    /// The builder store.
    #[must_use]
    pub fn store(&self) -> &Mutex<BuilderStore> {
        &self.inner.store
    }

    /// The saved-pass list repository.
    #[must_use]
    pub fn saved(&self) -> &SavedPassList {
        &self.inner.saved
    }

    /// The authentication marker.
    #[must_use]
    pub fn auth(&self) -> &AuthMarker {
        &self.inner.auth
    }
}
