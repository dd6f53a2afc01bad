//! File-backed session marker store.

use std::path::PathBuf;
use std::sync::Arc;

use apdesk_core::error::{DeskError, Result};
use apdesk_core::session::{SESSION_MARKER_KEY, SessionStore};
use async_trait::async_trait;

use crate::paths::DeskPaths;
use crate::storage::LocalStorage;

/// Session store that keeps the marker in `local_storage.toml`.
///
/// File access runs on the blocking pool so callers on the async runtime are
/// never stalled by the lock file.
#[derive(Clone)]
pub struct FileSessionStore {
    storage: Arc<LocalStorage>,
}

impl FileSessionStore {
    /// Uses the default location from [`DeskPaths`].
    pub fn new(paths: &DeskPaths) -> Result<Self> {
        Ok(Self::with_path(paths.local_storage_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            storage: Arc::new(LocalStorage::new(path)),
        }
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&LocalStorage) -> Result<T> + Send + 'static,
    {
        let storage = self.storage.clone();
        tokio::task::spawn_blocking(move || f(&storage))
            .await
            .map_err(|e| DeskError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn read_marker(&self) -> Result<Option<String>> {
        self.blocking(|storage| Ok(storage.get_item(SESSION_MARKER_KEY)?))
            .await
    }

    async fn write_marker(&self, marker: &str) -> Result<()> {
        let marker = marker.to_string();
        self.blocking(move |storage| Ok(storage.set_item(SESSION_MARKER_KEY, &marker)?))
            .await
    }

    async fn clear_marker(&self) -> Result<()> {
        self.blocking(|storage| Ok(storage.remove_item(SESSION_MARKER_KEY)?))
            .await
    }
}
