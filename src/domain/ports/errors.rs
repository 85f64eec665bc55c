use thiserror::Error;

use crate::domain::models::MetadataError;

/// Errors surfaced by the sync ports and the reconciler.
///
/// Any of these is fatal to the current repository pass: the pass stops
/// without committing partial state, and the next scheduled pass corrects.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network or API failure from GitHub or the tracker.
    #[error("remote service unavailable: {0}")]
    RemoteUnavailable(String),

    /// A managed issue carries a corrupt metadata block.
    #[error("issue {issue_key} has a malformed metadata block: {source}")]
    MalformedMetadata {
        issue_key: String,
        #[source]
        source: MetadataError,
    },

    /// The remote refused a state transition, e.g. reopening an alert
    /// GitHub considers permanently fixed.
    #[error("illegal state transition for alert {alert_key}: {detail}")]
    IllegalStateTransition { alert_key: String, detail: String },

    /// Loading or saving the persisted sync state failed.
    #[error("state persistence failed: {0}")]
    StatePersistence(String),
}
