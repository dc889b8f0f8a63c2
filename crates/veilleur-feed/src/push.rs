//! The push update source: a long-lived `WebSocket` connection.
//!
//! The source runs an explicit connection state machine: Connecting,
//! Open, and PendingRetry. A failed connection attempt or a dropped
//! stream lands in PendingRetry, which waits a fixed delay (no
//! exponential growth, no retry cap) and goes back to Connecting. The
//! policy is fire-and-retry-forever: the source is never fatal to the
//! hosting session, a dead backend merely means stale data.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};
use veilleur_core::SensorStore;

use crate::config::BackendConfig;
use crate::error::FeedError;
use crate::ingest;

/// The connected stream type: plain TCP, upgraded by `connect_async`.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connection lifecycle states.
enum ConnectionPhase {
    /// Attempting to establish the connection.
    Connecting,
    /// Connected; reading frames until the stream ends.
    Open(Box<WsStream>),
    /// Waiting out the fixed retry delay before reconnecting.
    PendingRetry,
}

/// Long-lived push source feeding single-channel updates into the store.
pub struct PushSource {
    store: Arc<SensorStore>,
    url: String,
    reconnect_delay: Duration,
}

impl PushSource {
    /// Create a push source for the configured backend.
    pub fn new(store: Arc<SensorStore>, config: &BackendConfig) -> Self {
        Self {
            store,
            url: config.ws_url(),
            reconnect_delay: config.reconnect_delay,
        }
    }

    /// Run the connection state machine until the task is aborted.
    ///
    /// Each inbound text frame is decoded and applied through the shared
    /// ingestion path; malformed frames are dropped one at a time. Close
    /// frames and stream errors drive the transition to PendingRetry.
    pub async fn run(self) {
        let mut attempt: u64 = 0;
        let mut phase = ConnectionPhase::Connecting;
        loop {
            phase = match phase {
                ConnectionPhase::Connecting => {
                    attempt = attempt.saturating_add(1);
                    debug!(attempt = attempt, url = %self.url, "connecting to push stream");
                    match self.connect().await {
                        Ok(stream) => {
                            info!(url = %self.url, "push stream connected");
                            ConnectionPhase::Open(Box::new(stream))
                        }
                        Err(e) => {
                            warn!(url = %self.url, error = %e, "push stream connection failed");
                            ConnectionPhase::PendingRetry
                        }
                    }
                }
                ConnectionPhase::Open(stream) => {
                    self.drain_frames(*stream).await;
                    ConnectionPhase::PendingRetry
                }
                ConnectionPhase::PendingRetry => {
                    debug!(delay = ?self.reconnect_delay, "push stream retry pending");
                    sleep(self.reconnect_delay).await;
                    ConnectionPhase::Connecting
                }
            };
        }
    }

    /// Establish the connection.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::WebSocket`] when the handshake fails; the
    /// state machine turns that into a retry, never a crash.
    async fn connect(&self) -> Result<WsStream, FeedError> {
        let (stream, _response) = connect_async(self.url.as_str()).await?;
        Ok(stream)
    }

    /// Read frames until the stream closes, errors, or ends.
    async fn drain_frames(&self, mut stream: WsStream) {
        while let Some(frame) = stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    ingest::apply_push_frame(&self.store, &text).await;
                }
                Ok(Message::Close(_)) => {
                    info!("push stream closed by server");
                    return;
                }
                // Ping/pong are answered by the library; binary frames
                // are not part of the protocol.
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "push stream error");
                    return;
                }
            }
        }
        info!("push stream ended");
    }
}
