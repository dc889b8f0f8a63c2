//! Error types for the update sources.

/// Failures of the feed layer.
///
/// Transport faults are handled inside the sources (reconnect, next
/// tick); this type surfaces only where a caller asked for something
/// specific -- a history fetch, or configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// An HTTP request failed (connect, timeout, or error status).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The push stream failed to connect or dropped.
    #[error("push stream failed: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Invalid configuration value at startup.
    #[error("configuration error: {0}")]
    Config(String),
}
