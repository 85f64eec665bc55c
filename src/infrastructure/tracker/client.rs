//! HTTP client for the tracker's task API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::models::{Issue, NewIssue};
use crate::domain::ports::{IssueStore, SyncError};
use crate::infrastructure::tracker::error::TrackerError;
use crate::infrastructure::tracker::types::{
    Attachment, DataEnvelope, PageEnvelope, TrackerTask,
};

const PAGE_LIMIT: usize = 100;

/// Tracker API client implementing the [`IssueStore`] port, plus the task
/// and attachment surface the tracker-backed state store needs.
pub struct TrackerClient {
    http: ReqwestClient,
    base_url: String,
    token: String,
    workspace: String,
    project: String,
    end_state: String,
    reopen_state: String,
}

impl TrackerClient {
    pub fn new(
        base_url: &str,
        token: &str,
        workspace: &str,
        project: &str,
        end_state: &str,
        reopen_state: &str,
    ) -> Result<Self, TrackerError> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("gh2tracker")
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            workspace: workspace.to_string(),
            project: project.to_string(),
            end_state: end_state.to_string(),
            reopen_state: reopen_state.to_string(),
        })
    }

    pub fn end_state(&self) -> &str {
        &self.end_state
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
    }

    async fn check(&self, response: Response) -> Result<Response, TrackerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(TrackerError::from_status(status, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TrackerError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Ok(self.check(response).await?.json::<T>().await?)
    }

    // -- task surface ------------------------------------------------------

    /// All tasks in the configured project.
    pub async fn list_project_tasks(&self) -> Result<Vec<TrackerTask>, TrackerError> {
        let base = format!(
            "/projects/{}/tasks?opt_fields=id,name,notes,status&limit={PAGE_LIMIT}",
            self.project
        );
        let mut tasks = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let url = match &offset {
                Some(o) => format!("{base}&offset={o}"),
                None => base.clone(),
            };
            let page: PageEnvelope<TrackerTask> = self.get_json(&url).await?;
            tasks.extend(page.data);
            match page.next_page {
                Some(next) => offset = Some(next.offset),
                None => break,
            }
        }
        debug!(project = %self.project, count = tasks.len(), "fetched project tasks");
        Ok(tasks)
    }

    pub async fn get_task(&self, gid: &str) -> Result<TrackerTask, TrackerError> {
        let envelope: DataEnvelope<TrackerTask> = self
            .get_json(&format!("/tasks/{gid}?opt_fields=id,name,notes,status"))
            .await?;
        Ok(envelope.data)
    }

    pub async fn create_task(&self, name: &str, notes: &str) -> Result<TrackerTask, TrackerError> {
        let body = json!({
            "data": {
                "workspace": self.workspace,
                "projects": [self.project],
                "name": name,
                "notes": notes,
            }
        });
        let response = self
            .request(reqwest::Method::POST, "/tasks")
            .json(&body)
            .send()
            .await?;
        let task: DataEnvelope<TrackerTask> = self.check(response).await?.json().await?;
        info!(task_gid = %task.data.gid, name, "created tracker task");
        Ok(task.data)
    }

    pub async fn delete_task(&self, gid: &str) -> Result<(), TrackerError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/tasks/{gid}"))
            .send()
            .await?;
        self.check(response).await?;
        info!(task_gid = %gid, "deleted tracker task");
        Ok(())
    }

    pub async fn set_task_status(&self, gid: &str, status_name: &str) -> Result<(), TrackerError> {
        let body = json!({"data": {"status": {"name": status_name}}});
        let response = self
            .request(reqwest::Method::PUT, &format!("/tasks/{gid}"))
            .json(&body)
            .send()
            .await?;
        self.check(response).await?;
        debug!(task_gid = %gid, status_name, "transitioned tracker task");
        Ok(())
    }

    // -- attachment surface (used by the tracker-backed state store) -------

    pub async fn list_attachments(&self, task_gid: &str) -> Result<Vec<Attachment>, TrackerError> {
        let envelope: DataEnvelope<Vec<Attachment>> = self
            .get_json(&format!("/tasks/{task_gid}/attachments"))
            .await?;
        Ok(envelope.data)
    }

    pub async fn download_attachment(&self, gid: &str) -> Result<Vec<u8>, TrackerError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/attachments/{gid}/download"))
            .send()
            .await?;
        Ok(self.check(response).await?.bytes().await?.to_vec())
    }

    pub async fn delete_attachment(&self, gid: &str) -> Result<(), TrackerError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/attachments/{gid}"))
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    pub async fn upload_attachment(
        &self,
        task_gid: &str,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<(), TrackerError> {
        let part = reqwest::multipart::Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("application/json")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .request(reqwest::Method::POST, &format!("/tasks/{task_gid}/attachments"))
            .multipart(form)
            .send()
            .await?;
        self.check(response).await?;
        debug!(task_gid, filename, "uploaded attachment");
        Ok(())
    }
}

fn remote(err: TrackerError) -> SyncError {
    SyncError::RemoteUnavailable(err.to_string())
}

#[async_trait]
impl IssueStore for TrackerClient {
    async fn create_issue(&self, new: &NewIssue) -> Result<Issue, SyncError> {
        let task = self
            .create_task(&new.title, &new.description)
            .await
            .map_err(remote)?;
        Ok(task.to_issue(&self.end_state))
    }

    async fn fetch_issues(&self, repo_key: &str) -> Result<Vec<Issue>, SyncError> {
        let needle = format!("REPOSITORY_KEY={repo_key}");
        let tasks = self.list_project_tasks().await.map_err(remote)?;
        Ok(tasks
            .iter()
            .filter(|t| t.notes.contains(&needle))
            .map(|t| t.to_issue(&self.end_state))
            .collect())
    }

    async fn delete_issue(&self, issue: &Issue) -> Result<(), SyncError> {
        self.delete_task(&issue.issue_key).await.map_err(remote)
    }

    async fn set_issue_state(&self, issue: &Issue, open: bool) -> Result<(), SyncError> {
        let status = if open {
            &self.reopen_state
        } else {
            &self.end_state
        };
        self.set_task_status(&issue.issue_key, status)
            .await
            .map_err(remote)
    }
}
