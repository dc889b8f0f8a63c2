//! Backend connection configuration.
//!
//! The backend host is deployment-resolved, never hardcoded. All values
//! are loaded from environment variables with defaults matching the
//! deployed backend, so a bare `veilleur-dashboard` on the same host just
//! works.

use std::time::Duration;

use crate::error::FeedError;

/// Where and how to reach the sensor backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend host name or address.
    pub host: String,
    /// Backend port (serves both the push stream and the HTTP API).
    pub port: u16,
    /// Delay between poll ticks.
    pub poll_interval: Duration,
    /// Fixed delay before a push-stream reconnection attempt.
    pub reconnect_delay: Duration,
    /// Number of historical rows requested per history fetch.
    pub history_limit: u32,
}

impl BackendConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables (with defaults):
    /// - `VEILLEUR_BACKEND_HOST` -- backend host (default `localhost`)
    /// - `VEILLEUR_BACKEND_PORT` -- backend port (default `8000`)
    /// - `VEILLEUR_POLL_INTERVAL_MS` -- poll tick interval (default `2000`)
    /// - `VEILLEUR_RECONNECT_DELAY_MS` -- push retry delay (default `1000`)
    /// - `VEILLEUR_HISTORY_LIMIT` -- history fetch depth (default `10`)
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Config`] when a numeric variable is set but
    /// unparsable. This is the one failure surfaced at startup, before
    /// any session exists.
    pub fn from_env() -> Result<Self, FeedError> {
        let host = env_or("VEILLEUR_BACKEND_HOST", "localhost");
        let port = parse_env("VEILLEUR_BACKEND_PORT", 8000_u16)?;
        let poll_interval_ms = parse_env("VEILLEUR_POLL_INTERVAL_MS", 2000_u64)?;
        let reconnect_delay_ms = parse_env("VEILLEUR_RECONNECT_DELAY_MS", 1000_u64)?;
        let history_limit = parse_env("VEILLEUR_HISTORY_LIMIT", 10_u32)?;

        Ok(Self {
            host,
            port,
            poll_interval: Duration::from_millis(poll_interval_ms),
            reconnect_delay: Duration::from_millis(reconnect_delay_ms),
            history_limit,
        })
    }

    /// Push stream endpoint.
    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}/ws", self.host, self.port)
    }

    /// Latest-values / history endpoint (without `limit`).
    pub fn api_url(&self) -> String {
        format!("http://{}:{}/api/sensors", self.host, self.port)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 8000,
            poll_interval: Duration::from_millis(2000),
            reconnect_delay: Duration::from_millis(1000),
            history_limit: 10,
        }
    }
}

/// Read an environment variable with a fallback.
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Read and parse an environment variable with a fallback.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, FeedError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| FeedError::Config(format!("invalid {name}: {raw:?}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_deployed_backend() {
        let config = BackendConfig::default();
        assert_eq!(config.ws_url(), "ws://localhost:8000/ws");
        assert_eq!(config.api_url(), "http://localhost:8000/api/sensors");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.reconnect_delay, Duration::from_secs(1));
        assert_eq!(config.history_limit, 10);
    }

    #[test]
    fn urls_embed_the_configured_host() {
        let config = BackendConfig {
            host: "192.168.1.20".to_owned(),
            port: 9000,
            ..BackendConfig::default()
        };
        assert_eq!(config.ws_url(), "ws://192.168.1.20:9000/ws");
        assert_eq!(config.api_url(), "http://192.168.1.20:9000/api/sensors");
    }
}
