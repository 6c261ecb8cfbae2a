//! Bellhop Watch — headless notification feed watcher for the Shopfront
//! staff dashboard.
//!
//! Wires the concrete adapters into the feed manager, brings the feed up,
//! and keeps it live until interrupted. Alerts for high/critical
//! notifications surface as warn-level log lines.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use bellhop_core::config::AppConfig;
use bellhop_core::error::AppError;
use bellhop_feed::{ChangeSignal, FeedManager};
use bellhop_transport::{HttpHistoryClient, JsonFileStore, LogAlertSink, WsLiveChannel};

#[tokio::main]
async fn main() {
    let env = std::env::var("BELLHOP_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Watcher error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main watcher run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Bellhop v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(JsonFileStore::open(&config.store.path).await?);
    let history = Arc::new(HttpHistoryClient::new(&config.backend)?);
    let live = Arc::new(WsLiveChannel::new(&config.backend)?);
    let alerts = Arc::new(LogAlertSink::new());

    let manager = Arc::new(FeedManager::new(
        store,
        history,
        live,
        alerts,
        config.feed.clone(),
        ChangeSignal::new(),
    ));

    manager.resync().await;
    let listener = manager.spawn_change_listener();

    tracing::info!(
        phase = ?manager.phase(),
        unread = manager.unread_count(),
        "Feed ready"
    );

    let mut status = tokio::time::interval(Duration::from_secs(60));
    status.tick().await;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = status.tick() => {
                tracing::info!(
                    phase = ?manager.phase(),
                    unread = manager.unread_count(),
                    "Feed status"
                );
            }
        }
    }

    tracing::info!("Shutting down");
    listener.abort();
    manager.shutdown();
    Ok(())
}
