//! Ports abstracting the external systems the reconciler talks to.

pub mod alert_source;
pub mod errors;
pub mod issue_store;
pub mod state_store;

pub use alert_source::AlertSource;
pub use errors::SyncError;
pub use issue_store::IssueStore;
pub use state_store::StateStore;
