use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rxcore::receiver::{SensorReading, TagDetection};
use serde::{Deserialize, Serialize};

/// Identity of the reference transmitter injected by
/// [`FixtureConfig::include_reference_tag`].
pub const REFERENCE_TAG_IDENTITY: &str = "A69-9001-65011";

const REFERENCE_TAG: TagDetection = TagDetection {
    tag_serial_no: 65011,
    code_freq: 69,
    code_channel: 9001,
    detection_count: 1,
    code_char: 'A',
};

/// Configuration for generating synthetic receiver readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub readings: usize,
    pub records_per_reading: usize,
    pub seed: u64,
    pub base_latitude: f64,
    pub base_longitude: f64,
    pub start_timestamp: String,
    pub interval_minutes: i64,
    /// Replace the first record of every reading with the fixed reference
    /// transmitter, for exercising exclusion.
    pub include_reference_tag: bool,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            readings: 5,
            records_per_reading: 2,
            seed: 0,
            base_latitude: 36.7411,
            base_longitude: -121.8180,
            start_timestamp: "2025-06-07T00:00:00Z".into(),
            interval_minutes: 10,
            include_reference_tag: false,
        }
    }
}

/// Encodes one detection record into its 11-byte little-endian wire form.
pub fn encode_detection(detection: &TagDetection) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(11);
    bytes.extend_from_slice(&detection.tag_serial_no.to_le_bytes());
    bytes.extend_from_slice(&detection.code_freq.to_le_bytes());
    bytes.extend_from_slice(&detection.code_channel.to_le_bytes());
    bytes.extend_from_slice(&detection.detection_count.to_le_bytes());
    bytes.push(detection.code_char as u8);
    bytes
}

/// Encodes a payload: count header plus consecutive records, hex-encoded.
pub fn encode_payload_hex(detections: &[TagDetection]) -> String {
    let mut payload = (detections.len() as u32).to_le_bytes().to_vec();
    for detection in detections {
        payload.extend_from_slice(&encode_detection(detection));
    }
    hex::encode(payload)
}

pub fn build_reading(
    detections: &[TagDetection],
    timestamp: &DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> SensorReading {
    SensorReading::new(
        timestamp.to_rfc3339(),
        latitude,
        longitude,
        encode_payload_hex(detections),
    )
}

/// Builds a deterministic batch of synthetic readings for offline runs and
/// tests.
pub fn build_fixture_batch(config: &FixtureConfig) -> anyhow::Result<Vec<SensorReading>> {
    let start = DateTime::parse_from_rfc3339(&config.start_timestamp)
        .with_context(|| format!("parsing fixture start timestamp {}", config.start_timestamp))?
        .with_timezone(&Utc);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut readings = Vec::with_capacity(config.readings);

    for reading_index in 0..config.readings {
        let mut detections = Vec::with_capacity(config.records_per_reading);
        for record_index in 0..config.records_per_reading {
            if config.include_reference_tag && record_index == 0 {
                detections.push(REFERENCE_TAG);
                continue;
            }
            detections.push(TagDetection {
                tag_serial_no: rng.gen_range(1_000..60_000),
                code_freq: 69,
                code_channel: 9001,
                detection_count: rng.gen_range(1..30),
                code_char: 'A',
            });
        }

        let timestamp = start + Duration::minutes(config.interval_minutes * reading_index as i64);
        let latitude = config.base_latitude + rng.gen_range(-0.01..0.01);
        let longitude = config.base_longitude + rng.gen_range(-0.01..0.01);
        readings.push(build_reading(&detections, &timestamp, latitude, longitude));
    }

    Ok(readings)
}
