//! Tracker issue domain model.

use serde::{Deserialize, Serialize};

use crate::domain::models::metadata;
use crate::domain::models::Alert;

/// A tracker issue as returned by the issue store.
///
/// The raw description is kept so the reconciler can decode the embedded
/// metadata block itself; whether the issue is "managed" is decided there,
/// not by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Opaque store-assigned identifier.
    pub issue_key: String,
    /// Numeric identifier, used only for oldest-wins tie-breaks.
    pub id: u64,
    /// `true` = open, `false` = done. The store derives this from the
    /// issue's status name vs the configured end state.
    pub open: bool,
    /// Full free-text description, including the metadata trailer.
    pub description: String,
}

/// Fields for creating a new tracker issue from an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
}

impl NewIssue {
    /// Build the issue title and description for an alert, embedding the
    /// metadata block used for future matching.
    pub fn from_alert(alert: &Alert) -> Self {
        Self {
            title: format!(
                "{} {} in {}",
                alert.kind.title_prefix(),
                alert.short_desc,
                alert.repo_id
            ),
            description: metadata::render_description(alert),
        }
    }
}
