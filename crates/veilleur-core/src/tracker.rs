//! Value-transition detection over consecutive snapshots.
//!
//! Transition detection is a derived concern: the store only guarantees
//! snapshot replacement, and each presentation consumer owns one
//! [`ChangeTracker`] per channel it displays. The tracker compares the
//! previous and current value of its channel and appends a timestamped
//! entry to its append-only log when the value actually changed.
//!
//! The very first observed value (the null-to-value transition) is
//! initialization, never a change, and is never logged.

use chrono::Local;
use veilleur_types::{ChangeLogEntry, ReconciledState, SensorChannel, SensorValue};

/// Display format for live change-log timestamps.
const LIVE_TIME_FORMAT: &str = "%H:%M:%S";

/// Per-channel change-log tracker.
///
/// Feed it every snapshot the store publishes, in order. Entries
/// accumulate in arrival order, unbounded within a session.
#[derive(Debug)]
pub struct ChangeTracker {
    /// The channel this tracker watches.
    channel: SensorChannel,
    /// The value observed on the previous snapshot, updated on every
    /// observation (including to null).
    previous: Option<SensorValue>,
    /// Append-only change log.
    entries: Vec<ChangeLogEntry>,
}

impl ChangeTracker {
    /// Create a tracker with an empty log.
    pub const fn new(channel: SensorChannel) -> Self {
        Self {
            channel,
            previous: None,
            entries: Vec::new(),
        }
    }

    /// The channel this tracker watches.
    pub const fn channel(&self) -> SensorChannel {
        self.channel
    }

    /// Observe one snapshot.
    ///
    /// Appends an entry iff the previous value is known and non-null, the
    /// current value is known and non-null, and the two differ. Returns
    /// the appended entry, if any.
    pub fn observe(&mut self, snapshot: &ReconciledState) -> Option<&ChangeLogEntry> {
        let current = snapshot.reading(self.channel).value;
        let changed = matches!(
            (self.previous, current),
            (Some(previous), Some(value)) if previous != value
        );
        self.previous = current;

        if !changed {
            return None;
        }
        let value = current?;
        self.entries.push(ChangeLogEntry {
            time: Local::now().format(LIVE_TIME_FORMAT).to_string(),
            value,
        });
        self.entries.last()
    }

    /// Seed the log from historical entries.
    ///
    /// Skipped (returns `false`) when the log already has entries: a
    /// non-empty log is the signal that this channel's history was already
    /// loaded or is already being built live. Accepting possible gaps is
    /// the tradeoff for never duplicating live entries.
    pub fn backfill(&mut self, entries: Vec<ChangeLogEntry>) -> bool {
        if !self.entries.is_empty() {
            return false;
        }
        self.entries = entries;
        true
    }

    /// The recorded transitions, in arrival order.
    pub fn entries(&self) -> &[ChangeLogEntry] {
        &self.entries
    }

    /// Whether no transition has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
