//! HTTP client for the GitHub REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::models::{Alert, AlertKind};
use crate::domain::ports::{AlertSource, SyncError};
use crate::infrastructure::github::error::GitHubError;
use crate::infrastructure::github::types::{CodeScanningAlert, SecretScanningAlert};

const PER_PAGE: usize = 100;

/// GitHub API client implementing the [`AlertSource`] port.
///
/// Connection pooling comes from the shared `reqwest::Client`; there is no
/// retry logic here, the tool is re-run periodically and a failed pass is
/// corrected by the next one.
pub struct GitHubClient {
    http: ReqwestClient,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, GitHubError> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("gh2tracker")
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    async fn check(&self, response: Response) -> Result<Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GitHubError::from_status(status, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GitHubError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Ok(self.check(response).await?.json::<T>().await?)
    }

    /// Fetch every page of a list endpoint.
    async fn get_paginated<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GitHubError> {
        let mut items = Vec::new();
        let mut page = 1usize;
        loop {
            let sep = if path.contains('?') { '&' } else { '?' };
            let url = format!("{path}{sep}per_page={PER_PAGE}&page={page}");
            let batch: Vec<T> = self.get_json(&url).await?;
            let done = batch.len() < PER_PAGE;
            items.extend(batch);
            if done {
                break;
            }
            page += 1;
        }
        Ok(items)
    }

    /// Scanning endpoints 404 when the feature is disabled for a repo;
    /// treat that as "no alerts" rather than a failure.
    async fn get_alert_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GitHubError> {
        match self.get_paginated(path).await {
            Ok(items) => Ok(items),
            Err(GitHubError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    // -- webhook management ------------------------------------------------

    pub async fn create_repo_hook(
        &self,
        repo_id: &str,
        hook_url: &str,
        secret: &str,
        insecure_ssl: bool,
    ) -> Result<(), GitHubError> {
        self.create_hook(&format!("/repos/{repo_id}/hooks"), hook_url, secret, insecure_ssl)
            .await
    }

    pub async fn create_org_hook(
        &self,
        org: &str,
        hook_url: &str,
        secret: &str,
        insecure_ssl: bool,
    ) -> Result<(), GitHubError> {
        self.create_hook(&format!("/orgs/{org}/hooks"), hook_url, secret, insecure_ssl)
            .await
    }

    async fn create_hook(
        &self,
        path: &str,
        hook_url: &str,
        secret: &str,
        insecure_ssl: bool,
    ) -> Result<(), GitHubError> {
        let body = json!({
            "name": "web",
            "active": true,
            "events": ["code_scanning_alert", "secret_scanning_alert"],
            "config": {
                "url": hook_url,
                "content_type": "json",
                "secret": secret,
                "insecure_ssl": if insecure_ssl { "1" } else { "0" },
            },
        });
        let response = self
            .request(reqwest::Method::POST, path)
            .json(&body)
            .send()
            .await?;
        self.check(response).await?;
        info!(path, hook_url, "installed webhook");
        Ok(())
    }

    pub async fn list_repo_hooks(
        &self,
        repo_id: &str,
    ) -> Result<Vec<serde_json::Value>, GitHubError> {
        self.get_paginated(&format!("/repos/{repo_id}/hooks")).await
    }

    pub async fn list_org_hooks(&self, org: &str) -> Result<Vec<serde_json::Value>, GitHubError> {
        self.get_paginated(&format!("/orgs/{org}/hooks")).await
    }
}

fn remote(err: GitHubError) -> SyncError {
    SyncError::RemoteUnavailable(err.to_string())
}

#[async_trait]
impl AlertSource for GitHubClient {
    async fn code_scanning_alerts(&self, repo_id: &str) -> Result<Vec<Alert>, SyncError> {
        let raw: Vec<CodeScanningAlert> = self
            .get_alert_list(&format!("/repos/{repo_id}/code-scanning/alerts"))
            .await
            .map_err(remote)?;
        debug!(repo_id, count = raw.len(), "fetched code-scanning alerts");
        Ok(raw.into_iter().map(|a| a.into_alert(repo_id)).collect())
    }

    async fn secret_scanning_alerts(&self, repo_id: &str) -> Result<Vec<Alert>, SyncError> {
        let raw: Vec<SecretScanningAlert> = self
            .get_alert_list(&format!("/repos/{repo_id}/secret-scanning/alerts"))
            .await
            .map_err(remote)?;
        debug!(repo_id, count = raw.len(), "fetched secret-scanning alerts");
        Ok(raw.into_iter().map(|a| a.into_alert(repo_id)).collect())
    }

    async fn get_alert(&self, repo_id: &str, number: u64) -> Result<Alert, SyncError> {
        let raw: CodeScanningAlert = self
            .get_json(&format!("/repos/{repo_id}/code-scanning/alerts/{number}"))
            .await
            .map_err(remote)?;
        Ok(raw.into_alert(repo_id))
    }

    async fn set_alert_state(&self, alert: &Alert, open: bool) -> Result<(), SyncError> {
        let (path, body) = match (alert.kind, open) {
            (AlertKind::CodeScanning, true) => (
                format!("/repos/{}/code-scanning/alerts/{}", alert.repo_id, alert.number),
                json!({"state": "open"}),
            ),
            (AlertKind::CodeScanning, false) => (
                format!("/repos/{}/code-scanning/alerts/{}", alert.repo_id, alert.number),
                json!({"state": "dismissed", "dismissed_reason": "won't fix"}),
            ),
            (AlertKind::SecretScanning, true) => (
                format!("/repos/{}/secret-scanning/alerts/{}", alert.repo_id, alert.number),
                json!({"state": "open"}),
            ),
            (AlertKind::SecretScanning, false) => (
                format!("/repos/{}/secret-scanning/alerts/{}", alert.repo_id, alert.number),
                json!({"state": "resolved", "resolution": "wont_fix"}),
            ),
        };

        info!(
            alert_key = %alert.alert_key(),
            open,
            "transitioning alert state"
        );
        let response = self
            .request(reqwest::Method::PATCH, &path)
            .json(&body)
            .send()
            .await
            .map_err(|e| remote(GitHubError::Network(e)))?;

        match self.check(response).await {
            Ok(_) => Ok(()),
            Err(GitHubError::IllegalTransition(detail)) => {
                Err(SyncError::IllegalStateTransition {
                    alert_key: alert.alert_key(),
                    detail,
                })
            }
            Err(e) => Err(remote(e)),
        }
    }
}
