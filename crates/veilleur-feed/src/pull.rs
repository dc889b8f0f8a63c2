//! The pull update source: fixed-interval polling.
//!
//! On every tick the poller fetches the latest-per-channel snapshot from
//! the backend and applies each channel's most-recent row through the
//! shared ingestion path. The first tick fires immediately at startup so
//! the dashboard is populated without waiting out the interval.
//!
//! A failed tick is logged and forgotten: the timer never stops, and the
//! next scheduled tick is the only retry.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use veilleur_core::SensorStore;
use veilleur_types::ApiResponse;

use crate::config::BackendConfig;
use crate::error::FeedError;
use crate::ingest;

/// Timer-driven poller refreshing all channels from the backend.
pub struct PullSource {
    store: Arc<SensorStore>,
    client: reqwest::Client,
    url: String,
    poll_interval: Duration,
}

impl PullSource {
    /// Create a poller for the configured backend.
    pub fn new(store: Arc<SensorStore>, config: &BackendConfig) -> Self {
        Self {
            store,
            client: reqwest::Client::new(),
            url: config.api_url(),
            poll_interval: config.poll_interval,
        }
    }

    /// Run the poll loop until the task is aborted.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            ticker.tick().await;
            if let Err(e) = self.refresh().await {
                warn!(error = %e, "poll tick failed, retrying on the next tick");
            }
        }
    }

    /// Fetch the latest-per-channel snapshot and apply it to the store.
    ///
    /// A channel whose row list is empty is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] on request failure or error status.
    async fn refresh(&self) -> Result<(), FeedError> {
        debug!(url = %self.url, "fetching latest sensor values");
        let response: ApiResponse = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        ingest::apply_latest_rows(&self.store, &response).await;
        Ok(())
    }
}
