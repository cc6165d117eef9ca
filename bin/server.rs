// BIN Lookup - Web Server
// REST API with Axum over the CSV dataset

use anyhow::{Context, Result};
use bin_lookup::logging::init_logging;
use bin_lookup::{router, AppState, DatasetSource, ServerConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "bin-server", version, about = "BIN lookup HTTP API")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:3000
    #[arg(long)]
    bind: Option<String>,

    /// BIN dataset CSV
    #[arg(long)]
    data: Option<PathBuf>,

    /// Load the dataset once at startup instead of on every request
    #[arg(long)]
    preload: bool,
}

fn load_config(args: &Args) -> Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    if let Some(bind) = &args.bind {
        config.bind_addr = bind.clone();
    }
    if let Some(data) = &args.data {
        config.data_path = data.clone();
    }
    if args.preload {
        config.preload = true;
    }

    config.validate()?;
    Ok(config)
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_logging(config.log_filter());

    // Snapshot mode fails fast on a bad dataset
    let source = if config.preload {
        DatasetSource::snapshot(&config.data_path)
            .with_context(|| format!("Failed to preload dataset {:?}", config.data_path))?
    } else {
        DatasetSource::per_request(&config.data_path)
    };

    info!(
        data = %config.data_path.display(),
        mode = source.mode(),
        max_bulk = config.max_bulk,
        "dataset configured"
    );

    let app = router(AppState::new(source, config.limits()));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "🚀 BIN lookup server running");
    info!("   API: http://{}/api/bin?bin=411111", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
