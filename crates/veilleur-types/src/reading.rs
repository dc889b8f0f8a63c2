//! Readings, the reconciled snapshot, and change-log entries.
//!
//! A [`ReconciledState`] is one immutable snapshot of the last known value
//! per channel. Every field is always present; a field whose `value` is
//! `None` has simply never been observed this session. Snapshots are
//! replaced wholesale on every update, never mutated in place, so
//! consumers can rely on receiving a fresh snapshot to detect "something
//! changed".

use serde::{Deserialize, Serialize};

use crate::channel::SensorChannel;

/// A single measured value: a scalar for the numeric channels, a boolean
/// for the motion channel.
///
/// Equality on `Scalar` is exact (bitwise): transition detection compares
/// the values the backend actually delivered, with no tolerance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    /// A numeric measurement (humidity percent, temperature Celsius).
    Scalar(f64),
    /// A binary measurement (motion detected or not).
    Bool(bool),
}

impl PartialEq for SensorValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for SensorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// The last known reading of one channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// The measured value, or `None` if the channel was never observed.
    pub value: Option<SensorValue>,
    /// Backend-provided observation timestamp, carried verbatim.
    pub timestamp: Option<String>,
}

impl SensorReading {
    /// A reading observed at the given backend timestamp.
    pub const fn observed(value: SensorValue, timestamp: Option<String>) -> Self {
        Self {
            value: Some(value),
            timestamp,
        }
    }
}

/// One immutable snapshot of the reconciled sensor state.
///
/// Every channel's reading is always present, possibly null-valued. The
/// snapshot as a whole is the unit of publication: updates produce a new
/// snapshot identical to the previous one except for the named channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciledState {
    /// Last known humidity reading.
    pub humidity: SensorReading,
    /// Last known temperature reading.
    pub temperature: SensorReading,
    /// Last known motion reading.
    pub motion: SensorReading,
}

impl ReconciledState {
    /// The reading for the given channel.
    pub const fn reading(&self, channel: SensorChannel) -> &SensorReading {
        match channel {
            SensorChannel::Humidity => &self.humidity,
            SensorChannel::Temperature => &self.temperature,
            SensorChannel::Motion => &self.motion,
        }
    }

    /// Build the successor snapshot: identical to `self` except the named
    /// channel's reading is replaced.
    ///
    /// This is the partial-update primitive behind the store contract: the
    /// other two channels are carried over untouched, so an update from
    /// one source can never blank out data delivered by the other.
    pub fn with_reading(&self, channel: SensorChannel, reading: SensorReading) -> Self {
        let mut next = self.clone();
        match channel {
            SensorChannel::Humidity => next.humidity = reading,
            SensorChannel::Temperature => next.temperature = reading,
            SensorChannel::Motion => next.motion = reading,
        }
        next
    }
}

/// A recorded value transition with its observation time.
///
/// Appended to a channel's change log only when the value actually changed
/// between two consecutive observations. Logs are ordered by arrival,
/// append-only, and unbounded within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    /// Display-formatted observation time.
    pub time: String,
    /// The value the channel changed to.
    pub value: SensorValue,
}
