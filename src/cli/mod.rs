//! Command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "gh2tracker",
    version,
    about = "Keep GitHub security alerts and tracker issues in sync"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Synchronize GitHub alerts and tracker issues for a given repository
    Sync(commands::sync::SyncArgs),
    /// Spawn a webserver which keeps GitHub alerts and tracker issues in sync
    Serve(commands::serve::ServeArgs),
    /// Manage GitHub webhooks
    Hooks(commands::hooks::HooksArgs),
}

/// Print the error chain and exit non-zero.
pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("Error: {err:#}");
    std::process::exit(1);
}
