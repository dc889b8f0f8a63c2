//! Shared ingestion path for both update sources.
//!
//! Every update reaching the store -- push frame or poll row -- goes
//! through [`apply_entity_state`]: map the entity id onto a channel,
//! parse the raw state per the channel's rules, apply to the store. An
//! unrecognized entity id or a malformed value drops that single update
//! with a warning; the snapshot keeps its last known readings.

use tracing::warn;
use veilleur_core::SensorStore;
use veilleur_types::{ApiResponse, BackendMessage, SensorChannel};

/// Map, parse, and apply one entity update.
///
/// Returns `true` when the update reached the store.
pub async fn apply_entity_state(
    store: &SensorStore,
    entity_id: &str,
    state: &str,
    date_heure: &str,
) -> bool {
    let Some(channel) = SensorChannel::from_entity_id(entity_id) else {
        warn!(entity_id = entity_id, "unknown entity id, dropping update");
        return false;
    };
    let value = match channel.parse_state(state) {
        Ok(value) => value,
        Err(e) => {
            warn!(entity_id = entity_id, error = %e, "malformed state, dropping update");
            return false;
        }
    };
    store
        .apply_channel_update(channel, value, Some(date_heure.to_owned()))
        .await;
    true
}

/// Decode and apply one push frame.
///
/// A frame that is not valid [`BackendMessage`] JSON is dropped with a
/// warning; processing continues with the next frame.
pub async fn apply_push_frame(store: &SensorStore, frame: &str) -> bool {
    match serde_json::from_str::<BackendMessage>(frame) {
        Ok(message) => {
            apply_entity_state(store, &message.entity_id, &message.state, &message.date_heure)
                .await
        }
        Err(e) => {
            warn!(error = %e, "dropping malformed push frame");
            false
        }
    }
}

/// Apply the most-recent row of every channel in a poll response.
///
/// Rows are ordered most-recent-first, so the first row per entity is the
/// latest value. A channel with no rows is left untouched, never nulled.
pub async fn apply_latest_rows(store: &SensorStore, response: &ApiResponse) {
    for (entity_id, rows) in &response.data {
        if let Some(latest) = rows.first() {
            apply_entity_state(store, entity_id, &latest.state, &latest.date_heure).await;
        }
    }
}
