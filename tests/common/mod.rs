//! In-memory fakes for the reconciler's ports.
//!
//! Each fake counts mutations so tests can assert that a pass performed
//! no work (idempotence) or exactly the expected operations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use gh2tracker::domain::models::{Alert, Issue, NewIssue, SyncState};
use gh2tracker::domain::ports::{AlertSource, IssueStore, StateStore, SyncError};

#[derive(Default)]
pub struct FakeAlertSource {
    pub alerts: Mutex<Vec<Alert>>,
    pub transitions: AtomicUsize,
}

impl FakeAlertSource {
    pub fn with_alerts(alerts: Vec<Alert>) -> Self {
        Self {
            alerts: Mutex::new(alerts),
            transitions: AtomicUsize::new(0),
        }
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.load(Ordering::SeqCst)
    }

    pub fn alert_state(&self, alert_key: &str) -> Option<bool> {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.alert_key() == alert_key)
            .map(|a| a.open)
    }
}

#[async_trait]
impl AlertSource for FakeAlertSource {
    async fn code_scanning_alerts(&self, repo_id: &str) -> Result<Vec<Alert>, SyncError> {
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.repo_id == repo_id)
            .cloned()
            .collect())
    }

    async fn secret_scanning_alerts(&self, _repo_id: &str) -> Result<Vec<Alert>, SyncError> {
        // the fakes keep all alerts in one list, reported as code scanning
        Ok(Vec::new())
    }

    async fn get_alert(&self, repo_id: &str, number: u64) -> Result<Alert, SyncError> {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.repo_id == repo_id && a.number == number)
            .cloned()
            .ok_or_else(|| SyncError::RemoteUnavailable(format!("no alert {number}")))
    }

    async fn set_alert_state(&self, alert: &Alert, open: bool) -> Result<(), SyncError> {
        let mut alerts = self.alerts.lock().unwrap();
        let stored = alerts
            .iter_mut()
            .find(|a| a.alert_key() == alert.alert_key())
            .ok_or_else(|| SyncError::RemoteUnavailable("alert vanished".to_string()))?;
        // GitHub never reopens a fixed alert
        if !stored.open && open {
            return Err(SyncError::IllegalStateTransition {
                alert_key: stored.alert_key(),
                detail: "alert is permanently fixed".to_string(),
            });
        }
        stored.open = open;
        self.transitions.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeIssueStore {
    pub issues: Mutex<Vec<Issue>>,
    next_id: AtomicUsize,
    pub created: AtomicUsize,
    pub deleted: AtomicUsize,
    pub transitions: AtomicUsize,
}

impl FakeIssueStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Self::default()
        }
    }

    /// Seed an issue directly, in whatever state the test needs.
    pub fn seed(&self, description: String, open: bool) -> Issue {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as u64;
        let issue = Issue {
            issue_key: format!("task-{id}"),
            id,
            open,
            description,
        };
        self.issues.lock().unwrap().push(issue.clone());
        issue
    }

    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted.load(Ordering::SeqCst)
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.load(Ordering::SeqCst)
    }

    pub fn all(&self) -> Vec<Issue> {
        self.issues.lock().unwrap().clone()
    }

    /// Flip an issue's state out of band, as a human user would in the
    /// tracker UI. Not counted as a sync mutation.
    pub fn set_issue_open(&self, issue_key: &str, open: bool) {
        let mut issues = self.issues.lock().unwrap();
        let issue = issues
            .iter_mut()
            .find(|i| i.issue_key == issue_key)
            .expect("issue exists");
        issue.open = open;
    }
}

#[async_trait]
impl IssueStore for FakeIssueStore {
    async fn create_issue(&self, new: &NewIssue) -> Result<Issue, SyncError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(self.seed(new.description.clone(), true))
    }

    async fn fetch_issues(&self, repo_key: &str) -> Result<Vec<Issue>, SyncError> {
        let needle = format!("REPOSITORY_KEY={repo_key}");
        Ok(self
            .issues
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.description.contains(&needle))
            .cloned()
            .collect())
    }

    async fn delete_issue(&self, issue: &Issue) -> Result<(), SyncError> {
        self.deleted.fetch_add(1, Ordering::SeqCst);
        self.issues
            .lock()
            .unwrap()
            .retain(|i| i.issue_key != issue.issue_key);
        Ok(())
    }

    async fn set_issue_state(&self, issue: &Issue, open: bool) -> Result<(), SyncError> {
        self.transitions.fetch_add(1, Ordering::SeqCst);
        let mut issues = self.issues.lock().unwrap();
        let stored = issues
            .iter_mut()
            .find(|i| i.issue_key == issue.issue_key)
            .ok_or_else(|| SyncError::RemoteUnavailable("issue vanished".to_string()))?;
        stored.open = open;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStateStore {
    pub state: Mutex<SyncState>,
    pub saves: AtomicUsize,
}

impl MemoryStateStore {
    pub fn with_state(state: SyncState) -> Self {
        Self {
            state: Mutex::new(state),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> SyncState {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self, _repo_id: &str) -> Result<SyncState, SyncError> {
        Ok(self.state.lock().unwrap().clone())
    }

    async fn save(&self, _repo_id: &str, state: &SyncState) -> Result<(), SyncError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.state.lock().unwrap() = state.clone();
        Ok(())
    }
}
