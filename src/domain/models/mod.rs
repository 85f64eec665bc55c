//! Domain models: alerts, issues, the metadata codec, and persisted state.

pub mod alert;
pub mod config;
pub mod direction;
pub mod issue;
pub mod metadata;
pub mod state;

pub use alert::{make_key, repo_key, Alert, AlertKind};
pub use config::{Config, GitHubConfig, ServerConfig, SyncConfig, TrackerConfig};
pub use direction::{Authority, SyncDirection};
pub use issue::{Issue, NewIssue};
pub use metadata::{AlertInfo, MetadataError};
pub use state::SyncState;
