//! ==============================================================================
//! main.rs - reading store service entry point
//! ==============================================================================
//!
//! purpose:
//!     a small http service that collects sensor readings per device and
//!     hands them back on request. each device keeps a set of readings, so
//!     posting the same reading twice stores it once.
//!
//! responsibilities:
//!     - load configuration (config/reading-store.toml, or defaults)
//!     - install the tracing subscriber
//!     - own the reading store and share it with the http handlers
//!     - serve until ctrl+c
//!
//! relationships:
//!     - uses: config.rs (listener address, log level)
//!     - uses: store.rs (device id -> reading set)
//!     - uses: api.rs (routes and handlers)
//!
//! architecture:
//!
//!     ┌──────────────────────────────────────────────┐
//!     │                 http (axum)                  │
//!     │  POST /post-readings    GET /get-reading/:id │
//!     └───────────┬──────────────────────┬───────────┘
//!                 │ write lock           │ read lock
//!                 └──────────┬───────────┘
//!                      ┌─────┴─────┐
//!                      │   store   │ <- store.rs
//!                      └───────────┘
//!
//! ==============================================================================

mod api;
mod config;
mod domain;
mod error;
mod store;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // step 1: load configuration
    let (config, config_note) = config::ServiceConfig::load_or_default();

    // step 2: logging, RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();

    info!("[CONFIG] {}", config_note);
    config.log_summary();

    // step 3: the store lives for the whole process
    let store = Arc::new(RwLock::new(store::ReadingStore::new()));

    // step 4: serve
    if let Err(e) = run_server(&config, store).await {
        error!("exiting with error: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run_server(config: &config::ServiceConfig, store: api::SharedStore) -> Result<()> {
    let addr = config.socket_addr()?;
    let app = api::router(store.clone());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    let devices = store.read().await.device_count();
    info!(devices, "Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl+c: {}", e);
        // without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
