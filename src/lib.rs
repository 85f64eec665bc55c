//! gh2tracker - GitHub security alert / tracker issue synchronization
//!
//! For each code-scanning or secret-scanning alert in a GitHub repository,
//! gh2tracker ensures exactly one corresponding tracker issue exists and
//! keeps the open/fixed state of the two in sync, in either direction.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **Domain Layer** (`domain`): alert/issue models, the metadata codec,
//!   and the ports abstracting GitHub, the tracker, and state persistence
//! - **Service Layer** (`services`): the reconciliation core
//! - **Infrastructure Layer** (`infrastructure`): REST adapters, state
//!   backends, configuration, and the webhook server
//! - **CLI Layer** (`cli`): command-line interface

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Alert, AlertInfo, AlertKind, Authority, Config, Issue, NewIssue, SyncDirection, SyncState,
};
pub use domain::ports::{AlertSource, IssueStore, StateStore, SyncError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::SyncService;
