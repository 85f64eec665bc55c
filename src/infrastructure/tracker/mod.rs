//! Tracker adapter: [`IssueStore`] implementation over a task-based REST API.
//!
//! [`IssueStore`]: crate::domain::ports::IssueStore

pub mod client;
pub mod error;
pub mod types;

pub use client::TrackerClient;
pub use error::TrackerError;
