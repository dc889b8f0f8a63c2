//! Parse errors for backend-provided state strings.

use crate::channel::SensorChannel;

/// Failure to interpret a raw backend state string.
///
/// A parse failure condemns only the single offending update: callers log
/// it and drop the message, the snapshot keeps its last known value.
#[derive(Debug, thiserror::Error)]
pub enum StateParseError {
    /// A scalar channel received a state that is not a number.
    #[error("channel {channel} expects a numeric state, got {raw:?}")]
    InvalidScalar {
        /// The channel the update was addressed to.
        channel: SensorChannel,
        /// The raw state string as delivered.
        raw: String,
    },
}
