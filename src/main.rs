//! plexinfo CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plexinfo::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; --verbose raises the default filter
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // A user interrupt is a clean exit, not a failure
    tokio::select! {
        result = cli.execute() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted by user");
            Ok(())
        }
    }
}
