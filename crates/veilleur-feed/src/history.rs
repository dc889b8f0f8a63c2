//! On-demand history backfill for one channel.
//!
//! Fetches up to N past rows from the same endpoint the poller uses
//! (`limit` is purely a depth control) and converts them into the same
//! change-log entry shape as live entries. A fetch failure is reported to
//! the caller and nowhere else; there is no automatic retry. The guard
//! against duplicating live entries lives in
//! [`ChangeTracker::backfill`](veilleur_core::ChangeTracker::backfill).

use chrono::{DateTime, NaiveDateTime};
use tracing::{debug, warn};
use veilleur_types::{ApiResponse, ChangeLogEntry, HistoryRow, SensorChannel};

use crate::config::BackendConfig;
use crate::error::FeedError;

/// Display format for backfilled change-log timestamps.
const HISTORY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// On-demand loader of past readings for single channels.
pub struct HistoryLoader {
    client: reqwest::Client,
    api_url: String,
    limit: u32,
}

impl HistoryLoader {
    /// Create a loader for the configured backend.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url(),
            limit: config.history_limit,
        }
    }

    /// Fetch the channel's past readings as change-log entries.
    ///
    /// Rows keep the backend's most-recent-first order. Rows whose state
    /// fails the channel's parse rules are skipped with a warning. A
    /// channel absent from the response yields an empty log.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] on request failure or error status;
    /// the triggering request is the only thing that failed, no global
    /// state is touched.
    pub async fn fetch(&self, channel: SensorChannel) -> Result<Vec<ChangeLogEntry>, FeedError> {
        let url = format!("{}?limit={}", self.api_url, self.limit);
        debug!(channel = %channel, url = %url, "fetching channel history");
        let response: ApiResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let rows = response
            .data
            .get(channel.entity_id())
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(convert_rows(channel, rows))
    }
}

/// Convert history rows into change-log entries per the channel's rules.
pub fn convert_rows(channel: SensorChannel, rows: &[HistoryRow]) -> Vec<ChangeLogEntry> {
    rows.iter()
        .filter_map(|row| match channel.parse_state(&row.state) {
            Ok(value) => Some(ChangeLogEntry {
                time: format_display_time(&row.date_heure),
                value,
            }),
            Err(e) => {
                warn!(channel = %channel, error = %e, "skipping unparsable history row");
                None
            }
        })
        .collect()
}

/// Reformat a backend timestamp for display.
///
/// The backend emits RFC 3339 with an offset; older rows may lack the
/// offset. An unparsable timestamp falls back to the raw string rather
/// than losing the row.
fn format_display_time(raw: &str) -> String {
    if let Ok(stamped) = DateTime::parse_from_rfc3339(raw) {
        return stamped.format(HISTORY_TIME_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(HISTORY_TIME_FORMAT).to_string();
    }
    raw.to_owned()
}

#[cfg(test)]
mod tests {
    use veilleur_types::SensorValue;

    use super::*;

    fn row(state: &str, date_heure: &str) -> HistoryRow {
        HistoryRow {
            state: state.to_owned(),
            date_heure: date_heure.to_owned(),
        }
    }

    #[test]
    fn rows_convert_in_backend_order() {
        let rows = [
            row("60.0", "2024-01-01T10:00:02+00:00"),
            row("55.2", "2024-01-01T10:00:00+00:00"),
        ];
        let entries = convert_rows(SensorChannel::Humidity, &rows);
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.first().map(|e| e.value),
            Some(SensorValue::Scalar(60.0))
        );
        assert_eq!(
            entries.first().map(|e| e.time.as_str()),
            Some("2024-01-01 10:00:02")
        );
    }

    #[test]
    fn unparsable_rows_are_skipped_not_fatal() {
        let rows = [
            row("unavailable", "2024-01-01T10:00:02+00:00"),
            row("55.2", "2024-01-01T10:00:00+00:00"),
        ];
        let entries = convert_rows(SensorChannel::Humidity, &rows);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries.first().map(|e| e.value),
            Some(SensorValue::Scalar(55.2))
        );
    }

    #[test]
    fn motion_rows_parse_as_booleans() {
        let rows = [row("on", "2024-01-01T10:00:00+00:00")];
        let entries = convert_rows(SensorChannel::Motion, &rows);
        assert_eq!(
            entries.first().map(|e| e.value),
            Some(SensorValue::Bool(true))
        );
    }

    #[test]
    fn offsetless_timestamps_still_format() {
        let rows = [row("21.5", "2024-01-01T10:00:00")];
        let entries = convert_rows(SensorChannel::Temperature, &rows);
        assert_eq!(
            entries.first().map(|e| e.time.as_str()),
            Some("2024-01-01 10:00:00")
        );
    }

    #[test]
    fn garbage_timestamps_fall_back_to_the_raw_string() {
        let rows = [row("21.5", "not-a-date")];
        let entries = convert_rows(SensorChannel::Temperature, &rows);
        assert_eq!(entries.first().map(|e| e.time.as_str()), Some("not-a-date"));
    }
}
