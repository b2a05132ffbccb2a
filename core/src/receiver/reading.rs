use serde::{Deserialize, Serialize};

/// One telemetry sample from the receiver, as delivered by the sensor-data
/// API: a position, an ISO-8601 timestamp, and a hex-encoded payload of
/// zero or more detection records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub value: String,
}

impl SensorReading {
    pub fn new(
        timestamp: impl Into<String>,
        latitude: f64,
        longitude: f64,
        value: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            latitude,
            longitude,
            value: value.into(),
        }
    }
}
