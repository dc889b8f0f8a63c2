//! The presentation consumer: per-channel change logs over the store.
//!
//! Stands in for the chart layer of a graphical dashboard: it owns one
//! [`ChangeTracker`] per channel (the store itself never tracks
//! transitions), backfills each log from history once at startup, then
//! logs every live transition the store publishes.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use veilleur_core::{ChangeTracker, SensorStore};
use veilleur_feed::HistoryLoader;
use veilleur_types::SensorChannel;

/// Subscribe to the store and track transitions until the task is aborted.
///
/// History backfill failures are reported as warnings and leave the
/// affected log empty; live tracking proceeds regardless.
pub async fn run(store: Arc<SensorStore>, loader: HistoryLoader) {
    let mut rx = store.subscribe();
    let mut trackers: Vec<ChangeTracker> = SensorChannel::ALL
        .iter()
        .map(|channel| ChangeTracker::new(*channel))
        .collect();

    for tracker in &mut trackers {
        match loader.fetch(tracker.channel()).await {
            Ok(entries) => {
                let count = entries.len();
                if tracker.backfill(entries) {
                    info!(
                        channel = %tracker.channel(),
                        entries = count,
                        "change log backfilled from history"
                    );
                }
            }
            Err(e) => {
                warn!(
                    channel = %tracker.channel(),
                    error = %e,
                    "history backfill failed, starting with an empty log"
                );
            }
        }
    }

    loop {
        match rx.recv().await {
            Ok(snapshot) => {
                for tracker in &mut trackers {
                    if let Some(entry) = tracker.observe(&snapshot) {
                        let value = entry.value;
                        let time = entry.time.clone();
                        info!(
                            channel = %tracker.channel(),
                            value = %value,
                            time = %time,
                            log_entries = tracker.len(),
                            "sensor value changed"
                        );
                    }
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                // State is idempotent; resuming from the newest snapshot
                // is enough.
                debug!(skipped = skipped, "consumer lagged, skipping ahead");
            }
            Err(RecvError::Closed) => {
                info!("store closed, consumer stopping");
                return;
            }
        }
    }
}
