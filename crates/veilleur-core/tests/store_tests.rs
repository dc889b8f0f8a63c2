//! Integration tests for the reconciliation core.
//!
//! Exercises the store and tracker together the way the dashboard consumer
//! does: sources apply channel updates, a subscriber drains snapshots and
//! feeds per-channel trackers.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::sync::Arc;

use veilleur_core::{ChangeTracker, SensorStore};
use veilleur_types::{SensorChannel, SensorValue};

#[tokio::test]
async fn partial_updates_never_touch_other_channels() {
    let store = SensorStore::new();

    store
        .apply_channel_update(
            SensorChannel::Humidity,
            SensorValue::Scalar(55.2),
            Some("2024-01-01T10:00:00".to_owned()),
        )
        .await;
    store
        .apply_channel_update(
            SensorChannel::Motion,
            SensorValue::Bool(true),
            Some("2024-01-01T10:00:01".to_owned()),
        )
        .await;

    let before = store.current().await;
    store
        .apply_channel_update(
            SensorChannel::Temperature,
            SensorValue::Scalar(21.5),
            Some("2024-01-01T10:00:02".to_owned()),
        )
        .await;
    let after = store.current().await;

    // Only the updated channel moved; the other two are carried over.
    assert_eq!(after.humidity, before.humidity);
    assert_eq!(after.motion, before.motion);
    assert_eq!(after.temperature.value, Some(SensorValue::Scalar(21.5)));
}

#[tokio::test]
async fn concurrent_sources_serialize_through_the_store() {
    let store = Arc::new(SensorStore::new());
    let mut rx = store.subscribe();

    // Two tasks race on different channels, as push and pull do.
    let push_store = Arc::clone(&store);
    let push = tokio::spawn(async move {
        for i in 0..10_u32 {
            push_store
                .apply_channel_update(
                    SensorChannel::Humidity,
                    SensorValue::Scalar(f64::from(i)),
                    None,
                )
                .await;
        }
    });
    let pull_store = Arc::clone(&store);
    let pull = tokio::spawn(async move {
        for i in 0..10_u32 {
            pull_store
                .apply_channel_update(
                    SensorChannel::Temperature,
                    SensorValue::Scalar(f64::from(i)),
                    None,
                )
                .await;
        }
    });
    push.await.unwrap();
    pull.await.unwrap();

    // Every update produced exactly one publication.
    let mut seen = 0;
    while rx.try_recv().is_ok() {
        seen += 1;
    }
    assert_eq!(seen, 20);

    let last = store.current().await;
    assert_eq!(last.humidity.value, Some(SensorValue::Scalar(9.0)));
    assert_eq!(last.temperature.value, Some(SensorValue::Scalar(9.0)));
}

#[tokio::test]
async fn tracker_over_subscription_logs_only_real_transitions() {
    let store = SensorStore::new();
    let mut rx = store.subscribe();
    let mut tracker = ChangeTracker::new(SensorChannel::Humidity);

    // First value (null -> 55.2): initialization, no entry.
    store
        .apply_channel_update(SensorChannel::Humidity, SensorValue::Scalar(55.2), None)
        .await;
    // Same value again (poll tick confirming): no entry.
    store
        .apply_channel_update(SensorChannel::Humidity, SensorValue::Scalar(55.2), None)
        .await;
    // Unrelated channel: no entry.
    store
        .apply_channel_update(SensorChannel::Motion, SensorValue::Bool(true), None)
        .await;
    // Real transition: exactly one entry.
    store
        .apply_channel_update(SensorChannel::Humidity, SensorValue::Scalar(60.0), None)
        .await;

    for _ in 0..4 {
        let snapshot = rx.recv().await.unwrap();
        tracker.observe(&snapshot);
    }

    assert_eq!(tracker.len(), 1);
    assert_eq!(
        tracker.entries().first().map(|e| e.value),
        Some(SensorValue::Scalar(60.0))
    );
}
