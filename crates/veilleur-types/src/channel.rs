//! Channel identity and per-channel state parsing.
//!
//! Each of the three home sensors is identified on the wire by a stable
//! entity-id string assigned by the backend. Both update sources (push
//! stream and poller) must map those strings onto the same logical channel,
//! so the mapping lives here, next to the parsing rules.
//!
//! An entity id outside the mapping is not an error: callers drop the
//! update with a warning and leave the snapshot untouched.

use serde::{Deserialize, Serialize};

use crate::error::StateParseError;
use crate::reading::SensorValue;

/// One of the three logical sensor streams fed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorChannel {
    /// Relative humidity, percent.
    Humidity,
    /// Ambient temperature, degrees Celsius.
    Temperature,
    /// Motion detector (detected / not detected).
    Motion,
}

impl SensorChannel {
    /// All channels, in display order.
    pub const ALL: [Self; 3] = [Self::Humidity, Self::Temperature, Self::Motion];

    /// The backend entity id for this channel.
    ///
    /// Must match the backend's `states_meta` table exactly.
    pub const fn entity_id(self) -> &'static str {
        match self {
            Self::Humidity => "sensor.esptemp_humidite",
            Self::Temperature => "sensor.esptemp_temperature",
            Self::Motion => "binary_sensor.espir_detection_mouvement",
        }
    }

    /// Map a backend entity id onto its logical channel.
    ///
    /// Returns `None` for unrecognized ids; the caller is expected to log
    /// a warning and drop the update.
    pub fn from_entity_id(entity_id: &str) -> Option<Self> {
        match entity_id {
            "sensor.esptemp_humidite" => Some(Self::Humidity),
            "sensor.esptemp_temperature" => Some(Self::Temperature),
            "binary_sensor.espir_detection_mouvement" => Some(Self::Motion),
            _ => None,
        }
    }

    /// Parse a raw backend state string into this channel's value.
    ///
    /// The scalar channels (humidity, temperature) expect a float. The
    /// motion channel is total: `"on"` and `"true"` mean detected, any
    /// other string means not detected.
    ///
    /// # Errors
    ///
    /// Returns [`StateParseError::InvalidScalar`] when a scalar channel
    /// receives a non-numeric state (the backend emits strings such as
    /// `"unavailable"` when a sensor goes offline).
    pub fn parse_state(self, raw: &str) -> Result<SensorValue, StateParseError> {
        match self {
            Self::Humidity | Self::Temperature => raw
                .parse::<f64>()
                .map(SensorValue::Scalar)
                .map_err(|_| StateParseError::InvalidScalar {
                    channel: self,
                    raw: raw.to_owned(),
                }),
            Self::Motion => Ok(SensorValue::Bool(raw == "on" || raw == "true")),
        }
    }
}

impl std::fmt::Display for SensorChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Humidity => "humidity",
            Self::Temperature => "temperature",
            Self::Motion => "motion",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_mapping_round_trips() {
        for channel in SensorChannel::ALL {
            assert_eq!(
                SensorChannel::from_entity_id(channel.entity_id()),
                Some(channel)
            );
        }
    }

    #[test]
    fn unknown_entity_id_maps_to_none() {
        assert_eq!(SensorChannel::from_entity_id("sensor.unknown"), None);
        assert_eq!(SensorChannel::from_entity_id(""), None);
    }

    #[test]
    fn scalar_parse_accepts_floats() {
        let value = SensorChannel::Humidity.parse_state("55.2");
        assert_eq!(value.ok(), Some(SensorValue::Scalar(55.2)));

        let value = SensorChannel::Temperature.parse_state("-3.5");
        assert_eq!(value.ok(), Some(SensorValue::Scalar(-3.5)));
    }

    #[test]
    fn scalar_parse_rejects_non_numeric_states() {
        assert!(SensorChannel::Humidity.parse_state("unavailable").is_err());
        assert!(SensorChannel::Temperature.parse_state("unknown").is_err());
        assert!(SensorChannel::Temperature.parse_state("").is_err());
    }

    #[test]
    fn motion_parse_is_total() {
        let cases = [
            ("on", true),
            ("true", true),
            ("off", false),
            ("unavailable", false),
            ("", false),
            ("ON", false),
        ];
        for (raw, expected) in cases {
            assert_eq!(
                SensorChannel::Motion.parse_state(raw).ok(),
                Some(SensorValue::Bool(expected)),
                "motion state {raw:?}"
            );
        }
    }
}
