use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;

use crate::cli::commands::{github_client, load_config, require, tracker_client};
use crate::cli::commands::{CredentialArgs, SyncBehaviorArgs};
use crate::domain::ports::StateStore;
use crate::infrastructure::state::{FileStateStore, TrackerStateStore};
use crate::services::SyncService;

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub creds: CredentialArgs,

    #[command(flatten)]
    pub behavior: SyncBehaviorArgs,

    /// File holding the current states of all alerts. The program will
    /// create the file if it doesn't exist and update it after each run.
    #[arg(long)]
    pub state_file: Option<String>,

    /// The key of the issue holding the current states of all alerts. The
    /// program will create the issue if "-" is given as the argument. The
    /// issue will be updated after each run.
    #[arg(long)]
    pub state_issue: Option<String>,
}

/// Handle the `sync` command: one full pass for one repository.
pub async fn execute(args: SyncArgs) -> Result<()> {
    let mut config = load_config(&args.creds, &args.behavior)?;
    if args.state_file.is_some() {
        config.sync.state_file = args.state_file.clone();
    }
    if args.state_issue.is_some() {
        config.sync.state_issue = args.state_issue.clone();
    }

    let org = require(args.creds.gh_org.as_deref().unwrap_or(""), "GitHub organization")?;
    let repo = require(args.creds.gh_repo.as_deref().unwrap_or(""), "GitHub repository")?;
    let repo_id = format!("{org}/{repo}");

    let github = Arc::new(github_client(&config)?);
    let tracker = tracker_client(&config)?;

    let states: Arc<dyn StateStore> = match (&config.sync.state_file, &config.sync.state_issue) {
        (Some(path), None) => Arc::new(FileStateStore::new(path)),
        (None, Some(key)) => Arc::new(TrackerStateStore::new(
            tracker.clone(),
            Some(key.clone()),
        )),
        (Some(_), Some(_)) => bail!("--state-file and --state-issue are mutually exclusive"),
        (None, None) => bail!("Either --state-file or --state-issue must be specified!"),
    };

    let sync = SyncService::new(github, tracker, states, config.sync.direction);
    sync.sync_repo(&repo_id).await?;
    Ok(())
}
