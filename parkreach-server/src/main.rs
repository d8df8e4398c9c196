//! HTTP service answering straight-line park accessibility queries

mod config;
mod error;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use routes::create_router;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "parkreach-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server config TOML, defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the bind address from the config
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    info!(
        "Serving {} cities, default {} at {} m",
        config.cities.len(),
        config.default_city,
        config.default_threshold_m
    );
    let bind = config.bind;
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {bind}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
