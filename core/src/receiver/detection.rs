use crate::decoding::DecodedRecord;
use crate::prelude::DecodeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typed view of one decoded Rx-LIVE detection record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDetection {
    pub tag_serial_no: u32,
    pub code_freq: u16,
    pub code_channel: u16,
    pub detection_count: u16,
    pub code_char: char,
}

impl TryFrom<&DecodedRecord> for TagDetection {
    type Error = DecodeError;

    fn try_from(record: &DecodedRecord) -> Result<Self, Self::Error> {
        let u32_field = |name: &str| {
            record
                .get(name)
                .and_then(|value| value.as_u32())
                .ok_or_else(|| DecodeError::UnknownFieldType(name.to_string()))
        };
        let u16_field = |name: &str| {
            record
                .get(name)
                .and_then(|value| value.as_u16())
                .ok_or_else(|| DecodeError::UnknownFieldType(name.to_string()))
        };
        let char_field = |name: &str| {
            record
                .get(name)
                .and_then(|value| value.as_char())
                .ok_or_else(|| DecodeError::UnknownFieldType(name.to_string()))
        };

        Ok(Self {
            tag_serial_no: u32_field("tag_serial_no")?,
            code_freq: u16_field("code_freq")?,
            code_channel: u16_field("code_channel")?,
            detection_count: u16_field("detection_count")?,
            code_char: char_field("code_char")?,
        })
    }
}

/// Detection record enriched with identity, normalized time, and the
/// position of the reading that carried it. The unit collected into a
/// batch result; immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedDetection {
    pub tag_serial_no: u32,
    pub code_freq: u16,
    pub code_channel: u16,
    pub detection_count: u16,
    pub code_char: char,
    pub tag_identity: String,
    pub display_time: String,
    pub instant: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding::{decode_record, DETECTION_SCHEMA};

    #[test]
    fn typed_view_reads_all_fields() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&65011u32.to_le_bytes());
        bytes.extend_from_slice(&69u16.to_le_bytes());
        bytes.extend_from_slice(&9001u16.to_le_bytes());
        bytes.extend_from_slice(&3u16.to_le_bytes());
        bytes.push(b'A');

        let record = decode_record(&bytes, &DETECTION_SCHEMA).unwrap();
        let detection = TagDetection::try_from(&record).unwrap();
        assert_eq!(
            detection,
            TagDetection {
                tag_serial_no: 65011,
                code_freq: 69,
                code_channel: 9001,
                detection_count: 3,
                code_char: 'A',
            }
        );
    }
}
