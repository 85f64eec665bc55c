use async_trait::async_trait;

use crate::domain::models::{Issue, NewIssue};
use crate::domain::ports::errors::SyncError;

/// Port exposing the tracker's issues for the configured project.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Create a new issue. The description already carries the metadata
    /// trailer; the store is pure transport.
    async fn create_issue(&self, new: &NewIssue) -> Result<Issue, SyncError>;

    /// All issues in the project whose description mentions the given repo
    /// key. The store may over-match (plain substring search); the
    /// reconciler re-checks the decoded metadata.
    async fn fetch_issues(&self, repo_key: &str) -> Result<Vec<Issue>, SyncError>;

    async fn delete_issue(&self, issue: &Issue) -> Result<(), SyncError>;

    /// Transition the issue to the reopen state (`true`) or end state
    /// (`false`).
    async fn set_issue_state(&self, issue: &Issue, open: bool) -> Result<(), SyncError>;
}
