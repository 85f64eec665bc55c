//! Infrastructure layer: adapters for GitHub, the tracker, state
//! persistence, configuration, and the webhook server.

pub mod config;
pub mod github;
pub mod state;
pub mod tracker;
pub mod webhook;
