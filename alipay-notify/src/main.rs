//! Alipay notification receiver.
//!
//! # Usage
//!
//! ```bash
//! # Run with default config (config.toml in current directory)
//! cargo run -p alipay-notify --release
//!
//! # Run with custom config path
//! alipay-notify --config /path/to/config.toml
//!
//! # Configure logging level
//! RUST_LOG=debug alipay-notify
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to TOML configuration file (default: `config.toml`)
//! - `HOST` - Override bind address (default: `0.0.0.0`)
//! - `PORT` - Override port (default: `8080`)
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use alipay::Credentials;
use alipay_http::server::{NotifyState, notify_router};
use axum::Router;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use alipay_notify::handlers::{Health, health_router};
use alipay_notify::{LoggingHandler, NotifyConfig};

#[derive(Parser, Debug)]
#[command(name = "alipay-notify")]
#[command(about = "Receives and verifies Alipay asynchronous notifications")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "CONFIG", default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        tracing::error!("Notification receiver failed: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = NotifyConfig::load(&args.config)?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        path = %config.path,
        app_id = %config.alipay.app_id,
        "Loaded configuration"
    );

    let credentials = Credentials::from_config(&config.alipay)?;
    let state = NotifyState::new(credentials).with_handler(Arc::new(LoggingHandler));

    let app = Router::new()
        .merge(notify_router(&config.path, state))
        .merge(health_router(Health::from_config(&config)))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}{}", config.path);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = shutdown_signal().await;
            tracing::info!(signal, "Shutting down");
        })
        .await?;

    tracing::info!("Shut down gracefully");
    Ok(())
}

/// Resolves with the name of the first shutdown signal received.
#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
    }
}

/// Resolves once Ctrl-C is received.
#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for Ctrl-C");
    "Ctrl-C"
}
