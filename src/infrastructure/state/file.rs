//! Local JSON file backend for the sync state.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::models::SyncState;
use crate::domain::ports::{StateStore, SyncError};

/// Stores the state map as a single JSON file.
///
/// The file holds the state of the one repository the invocation syncs, so
/// the repo id is not part of the path. A missing file is an empty state;
/// saves go through a temp file and rename so a crash never leaves a
/// half-written map behind.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn io_err(path: &Path, err: std::io::Error) -> SyncError {
    SyncError::StatePersistence(format!("{}: {err}", path.display()))
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self, _repo_id: &str) -> Result<SyncState, SyncError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| SyncError::StatePersistence(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file yet, starting empty");
                Ok(SyncState::new())
            }
            Err(e) => Err(io_err(&self.path, e)),
        }
    }

    async fn save(&self, _repo_id: &str, state: &SyncState) -> Result<(), SyncError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| io_err(parent, e))?;
            }
        }

        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| SyncError::StatePersistence(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| io_err(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_err(&self.path, e))?;

        debug!(path = %self.path.display(), entries = state.len(), "saved state file");
        Ok(())
    }
}
