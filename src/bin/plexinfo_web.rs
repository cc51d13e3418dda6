//! plexinfo web front-end entrypoint

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plexinfo::web::{router, AppState};

/// Local web front-end for plexinfo
#[derive(Parser, Debug)]
#[command(name = "plexinfo-web")]
#[command(author, version, about, long_about = None)]
struct WebCli {
    /// Port to listen on
    #[arg(long, default_value_t = 9924)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = WebCli::parse();
    let app = router(AppState::discover());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cli.port))
        .await
        .with_context(|| format!("Failed to bind port {} (already in use?)", cli.port))?;

    info!("Web app running at: http://localhost:{}", cli.port);
    info!("Press Ctrl+C to stop the server");

    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}
