//! The reconciled sensor state store.
//!
//! [`SensorStore`] holds the latest known reading per channel and merges
//! updates from both sources through a single mutation entry point. Every
//! mutation replaces the snapshot wholesale and publishes the successor to
//! all subscribers, in publish order.
//!
//! Updates are applied strictly in the order their tasks reach the write
//! lock. The push and pull sources are independent, so no ordering exists
//! between them: a poll tick and a push frame for the same channel race,
//! and the last applied update wins regardless of which timestamp is
//! "truly" newer.

use tokio::sync::{RwLock, broadcast};
use tracing::debug;
use veilleur_types::{ReconciledState, SensorChannel, SensorReading, SensorValue};

/// Capacity of the broadcast channel for snapshots.
///
/// If a subscriber falls behind by more than this many snapshots it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest one, which is harmless: state is idempotent, a subscriber only
/// ever needs the latest value.
const BROADCAST_CAPACITY: usize = 256;

/// The reconciled state store.
///
/// Shared via [`Arc`](std::sync::Arc) across the source tasks and the
/// presentation consumers. Created with all readings null; lives for the
/// session; nothing is persisted.
#[derive(Debug)]
pub struct SensorStore {
    /// Broadcast sender publishing every successor snapshot.
    tx: broadcast::Sender<ReconciledState>,
    /// The current snapshot, replaced wholesale on every update.
    snapshot: RwLock<ReconciledState>,
}

impl SensorStore {
    /// Create a store with an all-null snapshot.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            snapshot: RwLock::new(ReconciledState::default()),
        }
    }

    /// Clone of the current snapshot.
    pub async fn current(&self) -> ReconciledState {
        self.snapshot.read().await.clone()
    }

    /// Subscribe to snapshot publications.
    ///
    /// The receiver yields every snapshot published after this call, in
    /// publish order.
    pub fn subscribe(&self) -> broadcast::Receiver<ReconciledState> {
        self.tx.subscribe()
    }

    /// Apply one channel update and publish the successor snapshot.
    ///
    /// The successor is identical to the current snapshot except the named
    /// channel's reading, which becomes `{value, timestamp}`. The other
    /// two channels are carried over untouched. Publication happens under
    /// the write lock so subscribers observe snapshots in application
    /// order.
    ///
    /// Returns the number of subscribers that received the publication;
    /// 0 is normal when no consumer is attached yet, not an error.
    pub async fn apply_channel_update(
        &self,
        channel: SensorChannel,
        value: SensorValue,
        timestamp: Option<String>,
    ) -> usize {
        let mut snapshot = self.snapshot.write().await;
        let next = snapshot.with_reading(channel, SensorReading::observed(value, timestamp));
        *snapshot = next.clone();
        debug!(channel = %channel, value = %value, "snapshot updated");
        // send fails only when there are zero receivers, which is normal
        // before the first consumer subscribes.
        self.tx.send(next).unwrap_or(0)
    }
}

impl Default for SensorStore {
    fn default() -> Self {
        Self::new()
    }
}
