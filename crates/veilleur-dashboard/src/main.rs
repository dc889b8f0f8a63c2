//! Headless dashboard host for the Veilleur sensor client.
//!
//! Wires together the reconciled state store, the two update sources,
//! and the change-log consumer, then runs until interrupted. The actual
//! chart rendering and styling live in a separate presentation layer;
//! this binary is the session whose lifetime bounds every task.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load backend configuration from the environment
//! 3. Create the sensor store
//! 4. Spawn the push source (`WebSocket`, reconnect-forever)
//! 5. Spawn the pull source (2-second poll, immediate first tick)
//! 6. Spawn the consumer (per-channel change logs, history backfill)
//! 7. Wait for ctrl-c, then tear everything down

mod consumer;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use veilleur_core::SensorStore;
use veilleur_feed::{BackendConfig, HistoryLoader, PullSource, PushSource};

/// Application entry point for the dashboard host.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the signal handler
/// cannot be installed. Everything after startup degrades instead of
/// failing: sources retry forever and the consumer survives lag.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("veilleur-dashboard starting");

    // 2. Load configuration.
    let config = BackendConfig::from_env()?;
    info!(
        host = config.host,
        port = config.port,
        poll_interval_ms = config.poll_interval.as_millis(),
        reconnect_delay_ms = config.reconnect_delay.as_millis(),
        history_limit = config.history_limit,
        "configuration loaded"
    );

    // 3. Create the store all sources and consumers share.
    let store = Arc::new(SensorStore::new());

    // 4. + 5. Spawn the two update sources.
    let push = tokio::spawn(PushSource::new(Arc::clone(&store), &config).run());
    let pull = tokio::spawn(PullSource::new(Arc::clone(&store), &config).run());

    // 6. Spawn the change-log consumer.
    let loader = HistoryLoader::new(&config);
    let consumer = tokio::spawn(consumer::run(Arc::clone(&store), loader));

    info!("update sources and consumer running");

    // 7. Run until interrupted, then tear down. All components are
    // independent subscribers, so no shutdown ordering is needed.
    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");
    push.abort();
    pull.abort();
    consumer.abort();

    Ok(())
}
