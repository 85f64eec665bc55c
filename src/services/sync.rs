//! Alert–issue reconciliation.
//!
//! One pass converges the tracker's issue set with GitHub's alert set for a
//! single repository: every alert ends up with exactly one issue mirroring
//! its state, orphaned issues are deleted, and state changes flow in the
//! authoritative direction chosen per alert.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::models::{metadata, repo_key, Alert, Authority, Issue, NewIssue, SyncDirection};
use crate::domain::ports::{AlertSource, IssueStore, StateStore, SyncError};

/// The reconciler. Owns no remote state; every pass recomputes the
/// alert/issue pairing from scratch, which makes a failed or skipped pass
/// harmless.
pub struct SyncService {
    alerts: Arc<dyn AlertSource>,
    issues: Arc<dyn IssueStore>,
    states: Arc<dyn StateStore>,
    direction: SyncDirection,
}

impl SyncService {
    pub fn new(
        alerts: Arc<dyn AlertSource>,
        issues: Arc<dyn IssueStore>,
        states: Arc<dyn StateStore>,
        direction: SyncDirection,
    ) -> Self {
        Self {
            alerts,
            issues,
            states,
            direction,
        }
    }

    /// Full reconciliation pass for one repository.
    ///
    /// Any remote failure aborts the pass before the state map is saved, so
    /// a partial pass never commits; the next pass redoes the work.
    pub async fn sync_repo(&self, repo_id: &str) -> Result<(), SyncError> {
        info!(repo_id, "performing full sync");

        let mut states = self.states.load(repo_id).await?;

        let mut alerts = self.alerts.secret_scanning_alerts(repo_id).await?;
        alerts.extend(self.alerts.code_scanning_alerts(repo_id).await?);

        let rkey = repo_key(repo_id);
        let issues = self.issues.fetch_issues(&rkey).await?;

        // Pair each alert with the issues claiming its key. Issues whose
        // key matches no live alert pair with None and get cleaned up.
        let mut pairs: BTreeMap<String, (Option<Alert>, Vec<Issue>)> = BTreeMap::new();
        for alert in alerts {
            pairs.insert(alert.alert_key(), (Some(alert), Vec::new()));
        }
        for issue in issues {
            let info = metadata::parse_alert_info(&issue.description).map_err(|source| {
                SyncError::MalformedMetadata {
                    issue_key: issue.issue_key.clone(),
                    source,
                }
            })?;
            // Unmanaged issues are never touched.
            let Some(info) = info else { continue };
            if info.repo_key != rkey {
                continue;
            }
            pairs
                .entry(info.alert_key)
                .or_insert_with(|| (None, Vec::new()))
                .1
                .push(issue);
        }

        // Entries for alerts that vanished without leaving issues behind
        // are acknowledged by dropping them.
        states.retain_keys(|key| pairs.contains_key(key));

        for (alert_key, (alert, issues)) in pairs {
            let past = states.get(&alert_key);
            let authority = self.select_authority(alert.as_ref(), past);
            debug!(alert_key, ?authority, ?past, "reconciling pair");

            match self.sync_pair(alert.as_ref(), issues, authority).await? {
                Some(open) => states.set(alert_key, open),
                None => states.remove(&alert_key),
            }
        }

        self.states.save(repo_id, &states).await?;
        info!(repo_id, entries = states.len(), "sync complete");
        Ok(())
    }

    /// Webhook fast path: reconcile a single freshly created alert without
    /// a full repository scan.
    ///
    /// A new alert has no previously observed state, so GitHub is always
    /// authoritative here. The persisted state map is left alone; the next
    /// full pass records the key.
    pub async fn alert_created(&self, repo_id: &str, alert_num: u64) -> Result<(), SyncError> {
        info!(repo_id, alert_num, "syncing single created alert");

        let alert = self.alerts.get_alert(repo_id, alert_num).await?;
        let alert_key = alert.alert_key();

        let rkey = repo_key(repo_id);
        let mut matching = Vec::new();
        for issue in self.issues.fetch_issues(&rkey).await? {
            let info = metadata::parse_alert_info(&issue.description).map_err(|source| {
                SyncError::MalformedMetadata {
                    issue_key: issue.issue_key.clone(),
                    source,
                }
            })?;
            if info.is_some_and(|i| i.alert_key == alert_key) {
                matching.push(issue);
            }
        }

        self.sync_pair(Some(&alert), matching, Authority::GitHub)
            .await?;
        Ok(())
    }

    /// Converge one alert with its matching issues.
    ///
    /// Returns the state to persist for the alert's key, or `None` when
    /// alert and issues are all gone.
    pub async fn sync_pair(
        &self,
        alert: Option<&Alert>,
        mut issues: Vec<Issue>,
        authority: Authority,
    ) -> Result<Option<bool>, SyncError> {
        // No alert: the issues are orphans of an alert that no longer
        // exists. Remove them all.
        let Some(alert) = alert else {
            for issue in &issues {
                info!(issue_key = %issue.issue_key, "deleting orphaned issue");
                self.issues.delete_issue(issue).await?;
            }
            return Ok(None);
        };

        // Every alert gets exactly one issue.
        if issues.is_empty() {
            let created = self.issues.create_issue(&NewIssue::from_alert(alert)).await?;
            info!(
                issue_key = %created.issue_key,
                alert_key = %alert.alert_key(),
                "created issue for alert"
            );
            if !alert.open {
                self.issues.set_issue_state(&created, false).await?;
            }
            return Ok(Some(alert.open));
        }

        // At most one issue per alert. Oldest wins so that repeated passes
        // (and duplicate-creating races) converge on the same survivor.
        if issues.len() > 1 {
            issues.sort_by_key(|i| i.id);
            for dup in issues.drain(1..) {
                info!(issue_key = %dup.issue_key, "deleting duplicate issue");
                self.issues.delete_issue(&dup).await?;
            }
        }
        let issue = &issues[0];

        match authority {
            Authority::GitHub => {
                if issue.open != alert.open {
                    self.issues.set_issue_state(issue, alert.open).await?;
                }
                Ok(Some(alert.open))
            }
            Authority::Tracker => {
                // A fixed alert can never be legally reopened on GitHub's
                // side. Refuse client-side and let GitHub win instead of
                // leaving the two systems disagreeing until a remote call
                // fails.
                if !alert.open && issue.open {
                    warn!(
                        alert_key = %alert.alert_key(),
                        issue_key = %issue.issue_key,
                        "illegal state transition: cannot reopen a fixed alert; GitHub stays authoritative"
                    );
                    self.issues.set_issue_state(issue, false).await?;
                    return Ok(Some(false));
                }
                if issue.open != alert.open {
                    self.alerts.set_alert_state(alert, issue.open).await?;
                }
                Ok(Some(issue.open))
            }
        }
    }

    /// Decide which side is authoritative for one alert on this pass.
    ///
    /// In `Both` mode a state change detected on GitHub (or a brand-new
    /// alert) always wins immediately; only in the steady state is a manual
    /// issue transition allowed to flow back to GitHub.
    fn select_authority(&self, alert: Option<&Alert>, past: Option<bool>) -> Authority {
        match self.direction {
            SyncDirection::Gh2tracker => Authority::GitHub,
            SyncDirection::Tracker2gh => Authority::Tracker,
            SyncDirection::Both => match alert {
                None => Authority::GitHub,
                Some(alert) if past != Some(alert.open) => Authority::GitHub,
                Some(_) => Authority::Tracker,
            },
        }
    }
}
