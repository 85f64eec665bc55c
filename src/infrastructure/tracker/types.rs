//! Wire types for the tracker's task API.
//!
//! Every payload is wrapped in a `{"data": ...}` envelope; list endpoints
//! paginate with an opaque offset token in `next_page`.

use serde::{Deserialize, Serialize};

use crate::domain::models::Issue;

#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_page: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
pub struct NextPage {
    pub offset: String,
}

/// A task as stored in the tracker.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerTask {
    /// Opaque identifier used in API paths.
    pub gid: String,
    /// Legacy numeric identifier; monotonically assigned, so smaller means
    /// older. Used for oldest-wins tie-breaks.
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    pub name: String,
}

impl TrackerTask {
    /// Project into the domain model. An issue is open unless its status
    /// name equals the configured end state.
    pub fn to_issue(&self, end_state: &str) -> Issue {
        Issue {
            issue_key: self.gid.clone(),
            id: self.id,
            open: self.status.name != end_state,
            description: self.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    pub gid: String,
    pub name: String,
}
