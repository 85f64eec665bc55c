use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::cli::commands::{github_client, load_config, require, tracker_client};
use crate::cli::commands::{CredentialArgs, SyncBehaviorArgs};
use crate::domain::ports::StateStore;
use crate::infrastructure::state::TrackerStateStore;
use crate::infrastructure::webhook;
use crate::services::SyncService;

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub creds: CredentialArgs,

    #[command(flatten)]
    pub behavior: SyncBehaviorArgs,

    /// The port the server will listen on
    #[arg(long)]
    pub port: Option<u16>,
}

/// Handle the `serve` command: run the webhook server until stopped.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let mut config = load_config(&args.creds, &args.behavior)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let secret = require(&config.server.secret, "Webhook secret")?.to_string();

    let github = Arc::new(github_client(&config)?);
    let tracker = tracker_client(&config)?;

    // A long-running server has no natural local state file per repo; the
    // tracker-backed store works for every repository that sends events.
    let states: Arc<dyn StateStore> =
        Arc::new(TrackerStateStore::new(tracker.clone(), config.sync.state_issue.clone()));

    let sync = SyncService::new(github, tracker, states, config.sync.direction);
    webhook::run_server(sync, secret, config.server.port).await
}
