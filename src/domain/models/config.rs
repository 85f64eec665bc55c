//! Configuration model.
//!
//! Loaded by the figment-based loader in `infrastructure::config`, then
//! overridden field by field with values from CLI flags.

use serde::{Deserialize, Serialize};

use crate::domain::models::SyncDirection;

/// Main configuration structure for gh2tracker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// GitHub connection settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Tracker connection settings
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Reconciliation settings
    #[serde(default)]
    pub sync: SyncConfig,

    /// Webhook server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// GitHub connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// API URL of the GitHub instance
    #[serde(default = "default_github_url")]
    pub url: String,

    /// API token
    #[serde(default)]
    pub token: String,
}

fn default_github_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            url: default_github_url(),
            token: String::new(),
        }
    }
}

/// Tracker connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrackerConfig {
    /// API URL of the tracker instance
    #[serde(default)]
    pub url: String,

    /// API token
    #[serde(default)]
    pub token: String,

    /// Workspace the project lives in
    #[serde(default)]
    pub workspace: String,

    /// Project key holding the managed issues
    #[serde(default)]
    pub project: String,

    /// Status name representing a closed issue
    #[serde(default = "default_end_state")]
    pub end_state: String,

    /// Status name used when reopening an issue
    #[serde(default = "default_reopen_state")]
    pub reopen_state: String,
}

fn default_end_state() -> String {
    "Done".to_string()
}

fn default_reopen_state() -> String {
    "To Do".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            workspace: String::new(),
            project: String::new(),
            end_state: default_end_state(),
            reopen_state: default_reopen_state(),
        }
    }
}

/// Reconciliation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SyncConfig {
    /// Trust direction between the two systems
    #[serde(default)]
    pub direction: SyncDirection,

    /// Path of the local JSON state file, if the file backend is used
    #[serde(default)]
    pub state_file: Option<String>,

    /// Key of the tracker state issue, `"-"` to auto-create, if the
    /// tracker backend is used
    #[serde(default)]
    pub state_issue: Option<String>,
}

/// Webhook server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Port the webhook server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared secret used to validate webhook signatures
    #[serde(default)]
    pub secret: String,
}

const fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            secret: String::new(),
        }
    }
}
