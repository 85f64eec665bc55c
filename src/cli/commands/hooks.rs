use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::cli::commands::{github_client, load_config, require};
use crate::cli::commands::{CredentialArgs, SyncBehaviorArgs};

#[derive(Debug, Args)]
pub struct HooksArgs {
    #[command(subcommand)]
    pub command: HooksCommand,
}

#[derive(Debug, Subcommand)]
pub enum HooksCommand {
    /// List existing GitHub webhooks
    List {
        #[command(flatten)]
        creds: CredentialArgs,
    },
    /// Install a GitHub webhook on a repository or organization
    Install {
        #[command(flatten)]
        creds: CredentialArgs,

        /// Webhook target url
        #[arg(long)]
        hook_url: Option<String>,

        /// Install the hook without SSL verification
        #[arg(long)]
        insecure_ssl: bool,
    },
    /// Check that hooks are installed properly
    Check {
        #[command(flatten)]
        creds: CredentialArgs,

        /// Webhook target url to look for
        #[arg(long)]
        hook_url: Option<String>,
    },
}

/// Handle the `hooks` subcommands.
pub async fn execute(args: HooksArgs) -> Result<()> {
    match args.command {
        HooksCommand::List { creds } => list(creds).await,
        HooksCommand::Install {
            creds,
            hook_url,
            insecure_ssl,
        } => install(creds, hook_url, insecure_ssl).await,
        HooksCommand::Check { creds, hook_url } => check(creds, hook_url).await,
    }
}

async fn list(creds: CredentialArgs) -> Result<()> {
    let config = load_config(&creds, &SyncBehaviorArgs::default())?;
    let org = require(creds.gh_org.as_deref().unwrap_or(""), "GitHub organization")?;
    let github = github_client(&config)?;

    let hooks = match &creds.gh_repo {
        Some(repo) => github.list_repo_hooks(&format!("{org}/{repo}")).await?,
        None => github.list_org_hooks(org).await?,
    };
    for hook in hooks {
        println!("{}", serde_json::to_string_pretty(&hook)?);
    }
    Ok(())
}

async fn install(creds: CredentialArgs, hook_url: Option<String>, insecure_ssl: bool) -> Result<()> {
    let config = load_config(&creds, &SyncBehaviorArgs::default())?;
    let Some(hook_url) = hook_url else {
        bail!("No hook URL specified!");
    };
    let secret = require(&config.server.secret, "hook secret")?.to_string();
    let org = require(creds.gh_org.as_deref().unwrap_or(""), "GitHub organization")?;
    let github = github_client(&config)?;

    match &creds.gh_repo {
        Some(repo) => {
            github
                .create_repo_hook(&format!("{org}/{repo}"), &hook_url, &secret, insecure_ssl)
                .await?;
        }
        None => {
            github
                .create_org_hook(org, &hook_url, &secret, insecure_ssl)
                .await?;
        }
    }
    Ok(())
}

async fn check(creds: CredentialArgs, hook_url: Option<String>) -> Result<()> {
    let config = load_config(&creds, &SyncBehaviorArgs::default())?;
    let Some(hook_url) = hook_url else {
        bail!("No hook URL specified!");
    };
    let org = require(creds.gh_org.as_deref().unwrap_or(""), "GitHub organization")?;
    let github = github_client(&config)?;

    let hooks = match &creds.gh_repo {
        Some(repo) => github.list_repo_hooks(&format!("{org}/{repo}")).await?,
        None => github.list_org_hooks(org).await?,
    };

    let installed = hooks.iter().any(|h| {
        h.get("config")
            .and_then(|c| c.get("url"))
            .and_then(|u| u.as_str())
            == Some(hook_url.as_str())
    });
    if !installed {
        bail!("No hook pointing at {hook_url} is installed");
    }
    println!("Hook pointing at {hook_url} is installed.");
    Ok(())
}
