//! # warden-daemon
//!
//! Warden permissions debug daemon.
//!
//! Builds a permission engine from `warden.toml`, then serves the
//! operator's debug surface over HTTP: the permission catalog with recent
//! decisions, a form for simulating a check, and a direct check endpoint.
//!
//! ## Usage
//!
//! ```text
//! warden-daemon --config warden.toml --bind 127.0.0.1:8001 --root --log-json
//! ```

mod api;
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::DaemonConfig;

/// Warden permissions debug daemon.
#[derive(Parser)]
#[command(name = "warden-daemon", about = "Warden permissions debug daemon")]
struct Cli {
    /// Path to warden.toml (defaults are used when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the config file.
    #[arg(long)]
    bind: Option<String>,

    /// Grant every permission to the actor {"id":"root"}.
    #[arg(long)]
    root: bool,

    /// Emit logs as JSON lines instead of plain text.
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("warden_daemon=info".parse()?)
                .add_directive("warden_policy=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let mut config = match &cli.config {
        Some(path) => DaemonConfig::load(path)?,
        None => DaemonConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    config.root |= cli.root;

    let engine = Arc::new(config.build_engine()?);
    tracing::info!(
        permissions = engine.registry().len(),
        audit_capacity = config.audit.capacity,
        "permission engine ready"
    );

    let app = api::router(AppState::new(engine, config.operator.clone()));
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!("Listening on http://{}/-/permissions", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Warden daemon shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
    }
}
