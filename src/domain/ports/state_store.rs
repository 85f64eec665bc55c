use async_trait::async_trait;

use crate::domain::models::SyncState;
use crate::domain::ports::errors::SyncError;

/// Port for persisting the per-repository sync state between passes.
///
/// Backends: a local JSON file, or a JSON attachment on a dedicated state
/// issue in the tracker.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the state for a repository. Missing state is an empty map, not
    /// an error.
    async fn load(&self, repo_id: &str) -> Result<SyncState, SyncError>;

    /// Persist the state for a repository, replacing any previous state.
    async fn save(&self, repo_id: &str, state: &SyncState) -> Result<(), SyncError>;
}
