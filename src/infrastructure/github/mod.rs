//! GitHub adapter: [`AlertSource`] implementation plus webhook management.
//!
//! [`AlertSource`]: crate::domain::ports::AlertSource

pub mod client;
pub mod error;
pub mod types;

pub use client::GitHubClient;
pub use error::GitHubError;
