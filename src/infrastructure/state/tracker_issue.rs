//! Tracker-backed state persistence.
//!
//! The state map lives as a JSON attachment on a dedicated "state issue" in
//! the tracker, so deployments without a writable filesystem (e.g. running
//! purely from CI) still keep state between passes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::models::SyncState;
use crate::domain::ports::{StateStore, SyncError};
use crate::infrastructure::tracker::types::TrackerTask;
use crate::infrastructure::tracker::{TrackerClient, TrackerError};

const STATE_ISSUE_SUMMARY: &str = "[Code Scanning Issue States]";
const STATE_ISSUE_KEY: &str = "gh2tracker-state-issue";

const STATE_ISSUE_TEMPLATE: &str = "\
This issue was automatically generated and contains states required for the \
synchronization between GitHub and the tracker.
DO NOT MODIFY DESCRIPTION BELOW LINE.
ISSUE_KEY=gh2tracker-state-issue
";

/// State store keeping the JSON map attached to a dedicated tracker issue.
pub struct TrackerStateStore {
    client: Arc<TrackerClient>,
    /// Explicit state issue key, or `None` to discover/create it by its
    /// embedded `ISSUE_KEY` marker.
    issue_key: Option<String>,
}

impl TrackerStateStore {
    pub fn new(client: Arc<TrackerClient>, issue_key: Option<String>) -> Self {
        // "-" on the CLI means auto-discover, same as no key at all
        let issue_key = issue_key.filter(|k| k != "-");
        Self { client, issue_key }
    }

    /// Attachment name for a repository's state blob.
    fn attachment_name(repo_id: &str) -> String {
        format!("{}.json", repo_id.replace('/', "^"))
    }

    fn is_state_task(task: &TrackerTask) -> bool {
        task.name == STATE_ISSUE_SUMMARY
            && task
                .notes
                .lines()
                .any(|l| l.trim_end() == format!("ISSUE_KEY={STATE_ISSUE_KEY}"))
    }

    /// Find or create the state issue.
    ///
    /// Two concurrent first-time syncs can both create one; the loser is
    /// detected on the re-fetch and deleted, even if it is the task this
    /// call just created. Oldest wins, as everywhere else.
    async fn state_task(&self) -> Result<TrackerTask, TrackerError> {
        if let Some(key) = &self.issue_key {
            return self.client.get_task(key).await;
        }

        let mut candidates = self.find_candidates().await?;

        if candidates.is_empty() {
            let created = self
                .client
                .create_task(STATE_ISSUE_SUMMARY, STATE_ISSUE_TEMPLATE)
                .await?;
            info!(task_gid = %created.gid, "created state issue");

            // re-fetch to resolve a concurrent-creation race
            candidates = self.find_candidates().await?;
            if candidates.is_empty() {
                // search lag; trust what we just created
                candidates.push(created);
            }
        }

        candidates.sort_by_key(|t| t.id);
        for dup in candidates.drain(1..) {
            warn!(task_gid = %dup.gid, "deleting duplicate state issue");
            self.client.delete_task(&dup.gid).await?;
        }
        Ok(candidates.remove(0))
    }

    async fn find_candidates(&self) -> Result<Vec<TrackerTask>, TrackerError> {
        let tasks = self.client.list_project_tasks().await?;
        Ok(tasks.into_iter().filter(Self::is_state_task).collect())
    }
}

fn remote(err: TrackerError) -> SyncError {
    SyncError::StatePersistence(err.to_string())
}

#[async_trait]
impl StateStore for TrackerStateStore {
    async fn load(&self, repo_id: &str) -> Result<SyncState, SyncError> {
        let task = self.state_task().await.map_err(remote)?;
        let fname = Self::attachment_name(repo_id);

        for attachment in self
            .client
            .list_attachments(&task.gid)
            .await
            .map_err(remote)?
        {
            if attachment.name == fname {
                let bytes = self
                    .client
                    .download_attachment(&attachment.gid)
                    .await
                    .map_err(remote)?;
                return serde_json::from_slice(&bytes)
                    .map_err(|e| SyncError::StatePersistence(format!("{fname}: {e}")));
            }
        }
        Ok(SyncState::new())
    }

    async fn save(&self, repo_id: &str, state: &SyncState) -> Result<(), SyncError> {
        let task = self.state_task().await.map_err(remote)?;
        let fname = Self::attachment_name(repo_id);

        // replace, not append: stale blobs for the repo go first
        for attachment in self
            .client
            .list_attachments(&task.gid)
            .await
            .map_err(remote)?
        {
            if attachment.name == fname {
                self.client
                    .delete_attachment(&attachment.gid)
                    .await
                    .map_err(remote)?;
            }
        }

        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| SyncError::StatePersistence(e.to_string()))?;
        self.client
            .upload_attachment(&task.gid, &fname, json)
            .await
            .map_err(remote)
    }
}
