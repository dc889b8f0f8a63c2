//! JSON payloads spoken by the backend.
//!
//! The push stream delivers one [`BackendMessage`] per frame. The HTTP
//! endpoint returns an [`ApiResponse`] keyed by entity id, with rows
//! ordered most-recent-first. Both carry state values as raw strings;
//! parsing into typed values is the caller's job via
//! [`SensorChannel::parse_state`](crate::channel::SensorChannel::parse_state).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One frame of the push stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendMessage {
    /// Backend entity id identifying the channel.
    pub entity_id: String,
    /// Raw state value as delivered by the backend.
    pub state: String,
    /// Observation timestamp (ISO 8601).
    pub date_heure: String,
}

/// One historical row of the HTTP endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    /// Raw state value as delivered by the backend.
    pub state: String,
    /// Observation timestamp (ISO 8601).
    pub date_heure: String,
}

/// Response of `GET /api/sensors[?limit=N]`.
///
/// Without `limit` this is the latest-per-channel snapshot used by the
/// poller; with `limit=N` it is the historical backfill used by the
/// history loader. `limit` is purely a depth control, not a semantic
/// switch. The backend returns an empty map alongside an error message on
/// its own failures, so `data` defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Rows per entity id, most-recent-first. A channel with no rows is
    /// simply absent or empty.
    #[serde(default)]
    pub data: HashMap<String, Vec<HistoryRow>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_decodes_from_push_frame() {
        let json = r#"{"entity_id":"sensor.esptemp_humidite","state":"55.2","date_heure":"2024-01-01T10:00:00"}"#;
        let message: BackendMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.entity_id, "sensor.esptemp_humidite");
        assert_eq!(message.state, "55.2");
        assert_eq!(message.date_heure, "2024-01-01T10:00:00");
    }

    #[test]
    fn api_response_tolerates_missing_data_field() {
        let response: ApiResponse = serde_json::from_str(r#"{"error":"db down"}"#).unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn api_response_decodes_rows_in_order() {
        let json = r#"{
            "data": {
                "sensor.esptemp_temperature": [
                    {"state": "21.5", "date_heure": "2024-01-01T10:00:02"},
                    {"state": "21.0", "date_heure": "2024-01-01T10:00:00"}
                ],
                "binary_sensor.espir_detection_mouvement": []
            }
        }"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        let rows = &response.data["sensor.esptemp_temperature"];
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.first().map(|r| r.state.as_str()), Some("21.5"));
    }
}
