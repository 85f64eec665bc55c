use async_trait::async_trait;

use crate::domain::models::Alert;
use crate::domain::ports::errors::SyncError;

/// Port exposing a repository's security alerts.
///
/// Implemented by the GitHub adapter; swapped for an in-memory fake in the
/// reconciler tests.
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// All current code-scanning alerts for a repository.
    async fn code_scanning_alerts(&self, repo_id: &str) -> Result<Vec<Alert>, SyncError>;

    /// All current secret-scanning findings for a repository.
    async fn secret_scanning_alerts(&self, repo_id: &str) -> Result<Vec<Alert>, SyncError>;

    /// Fetch a single code-scanning alert by number.
    async fn get_alert(&self, repo_id: &str, number: u64) -> Result<Alert, SyncError>;

    /// Transition the remote alert's state.
    ///
    /// Fails with [`SyncError::IllegalStateTransition`] when the remote
    /// rejects the transition, e.g. reopening a fixed alert.
    async fn set_alert_state(&self, alert: &Alert, open: bool) -> Result<(), SyncError>;
}
