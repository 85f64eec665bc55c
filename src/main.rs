//! gh2tracker CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gh2tracker::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sync(args) => gh2tracker::cli::commands::sync::execute(args).await,
        Commands::Serve(args) => gh2tracker::cli::commands::serve::execute(args).await,
        Commands::Hooks(args) => gh2tracker::cli::commands::hooks::execute(args).await,
    };

    if let Err(err) = result {
        gh2tracker::cli::handle_error(err);
    }
}
