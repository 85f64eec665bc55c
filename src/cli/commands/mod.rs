//! CLI command implementations.

pub mod hooks;
pub mod serve;
pub mod sync;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::domain::models::{Config, SyncDirection};
use crate::infrastructure::config::ConfigLoader;

/// Connection and credential flags shared by all subcommands.
#[derive(Debug, Clone, Default, Args)]
pub struct CredentialArgs {
    /// GitHub organization
    #[arg(long)]
    pub gh_org: Option<String>,

    /// GitHub repository
    #[arg(long)]
    pub gh_repo: Option<String>,

    /// API URL of the GitHub instance
    #[arg(long)]
    pub gh_url: Option<String>,

    /// GitHub API token
    #[arg(long, env = "GH2TRACKER_GH_TOKEN", hide_env_values = true)]
    pub gh_token: Option<String>,

    /// URL of the tracker instance
    #[arg(long)]
    pub tracker_url: Option<String>,

    /// Tracker workspace
    #[arg(long)]
    pub tracker_workspace: Option<String>,

    /// Tracker API token
    #[arg(long, env = "GH2TRACKER_TRACKER_TOKEN", hide_env_values = true)]
    pub tracker_token: Option<String>,

    /// Tracker project key
    #[arg(long)]
    pub tracker_project: Option<String>,

    /// Webhook secret
    #[arg(long, env = "GH2TRACKER_SECRET", hide_env_values = true)]
    pub secret: Option<String>,
}

/// Sync semantics flags shared by `sync` and `serve`.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncBehaviorArgs {
    /// Sync direction: "gh2tracker" (alert states have higher priority than
    /// issue states), "tracker2gh" (issue states have higher priority than
    /// alert states) or "both" (adjust in both directions)
    #[arg(long)]
    pub direction: Option<String>,

    /// Custom end state (e.g. Closed), Done by default
    #[arg(long)]
    pub issue_end_state: Option<String>,

    /// Custom reopen state (e.g. In Progress), To Do by default
    #[arg(long)]
    pub issue_reopen_state: Option<String>,
}

/// Load the layered configuration and apply CLI flags on top of it.
pub fn load_config(creds: &CredentialArgs, behavior: &SyncBehaviorArgs) -> Result<Config> {
    let mut config = ConfigLoader::load()?;

    let set = |target: &mut String, value: &Option<String>| {
        if let Some(v) = value {
            *target = v.clone();
        }
    };

    set(&mut config.github.url, &creds.gh_url);
    set(&mut config.github.token, &creds.gh_token);
    set(&mut config.tracker.url, &creds.tracker_url);
    set(&mut config.tracker.token, &creds.tracker_token);
    set(&mut config.tracker.workspace, &creds.tracker_workspace);
    set(&mut config.tracker.project, &creds.tracker_project);
    set(&mut config.server.secret, &creds.secret);
    set(&mut config.tracker.end_state, &behavior.issue_end_state);
    set(&mut config.tracker.reopen_state, &behavior.issue_reopen_state);

    if let Some(d) = &behavior.direction {
        config.sync.direction = SyncDirection::from_str(d)
            .with_context(|| format!("Unknown direction argument {d:?}"))?;
    }

    ConfigLoader::validate(&config)?;
    Ok(config)
}

/// Bail with a CLI-friendly message when a required setting is absent.
pub fn require<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.is_empty() {
        bail!("No {what} specified!");
    }
    Ok(value)
}

/// Build the GitHub client, checking required settings.
pub fn github_client(config: &Config) -> Result<crate::infrastructure::github::GitHubClient> {
    require(&config.github.url, "GitHub URL")?;
    require(&config.github.token, "GitHub token")?;
    crate::infrastructure::github::GitHubClient::new(&config.github.url, &config.github.token)
        .context("Failed to build GitHub client")
}

/// Build the tracker client, checking required settings.
pub fn tracker_client(
    config: &Config,
) -> Result<std::sync::Arc<crate::infrastructure::tracker::TrackerClient>> {
    require(&config.tracker.url, "tracker URL")?;
    require(&config.tracker.token, "tracker credentials")?;
    require(&config.tracker.workspace, "tracker workspace")?;
    require(&config.tracker.project, "tracker project")?;
    let client = crate::infrastructure::tracker::TrackerClient::new(
        &config.tracker.url,
        &config.tracker.token,
        &config.tracker.workspace,
        &config.tracker.project,
        &config.tracker.end_state,
        &config.tracker.reopen_state,
    )
    .context("Failed to build tracker client")?;
    Ok(std::sync::Arc::new(client))
}
