use crate::decoding::schema::{FieldKind, RecordSchema};
use crate::prelude::{DecodeError, DecodeResult};
use serde::{Deserialize, Serialize};

/// Decoded value of a single record field, carrying its natural width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Unsigned32(u32),
    Unsigned16(u16),
    Char(char),
}

impl FieldValue {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            FieldValue::Unsigned32(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self {
            FieldValue::Unsigned16(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            FieldValue::Char(value) => Some(*value),
            _ => None,
        }
    }
}

impl FieldKind {
    /// Decodes one field from a chunk whose length already matches
    /// `self.width()`. Multi-byte fields are little-endian.
    fn decode(self, chunk: &[u8]) -> FieldValue {
        match self {
            FieldKind::Unsigned32 => {
                FieldValue::Unsigned32(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            }
            FieldKind::Unsigned16 => {
                FieldValue::Unsigned16(u16::from_le_bytes([chunk[0], chunk[1]]))
            }
            FieldKind::Char => FieldValue::Char(chunk[0] as char),
        }
    }
}

/// Field-name to value mapping produced from one fixed-size byte slice.
///
/// Fields keep schema order; the record is never mutated after decode.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    fields: Vec<(&'static str, FieldValue)>,
}

impl DecodedRecord {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Decodes one record from a byte slice whose length must exactly equal
/// the schema's record size. Pure; same bytes always yield the same record.
pub fn decode_record(bytes: &[u8], schema: &RecordSchema) -> DecodeResult<DecodedRecord> {
    let expected = schema.record_size();
    if bytes.len() != expected {
        return Err(DecodeError::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let mut fields = Vec::with_capacity(schema.fields().len());
    let mut offset = 0;
    for spec in schema.fields() {
        let width = spec.kind.width();
        let chunk = &bytes[offset..offset + width];
        fields.push((spec.name, spec.kind.decode(chunk)));
        offset += width;
    }

    Ok(DecodedRecord { fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding::schema::DETECTION_SCHEMA;

    fn sample_record_bytes() -> Vec<u8> {
        // tag_serial_no=65011, code_freq=69, code_channel=9001,
        // detection_count=3, code_char='A'
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&65011u32.to_le_bytes());
        bytes.extend_from_slice(&69u16.to_le_bytes());
        bytes.extend_from_slice(&9001u16.to_le_bytes());
        bytes.extend_from_slice(&3u16.to_le_bytes());
        bytes.push(b'A');
        bytes
    }

    #[test]
    fn decode_yields_fields_in_schema_order() {
        let record = decode_record(&sample_record_bytes(), &DETECTION_SCHEMA).unwrap();
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "tag_serial_no",
                "code_freq",
                "code_channel",
                "detection_count",
                "code_char"
            ]
        );
    }

    #[test]
    fn decode_extracts_little_endian_values() {
        let record = decode_record(&sample_record_bytes(), &DETECTION_SCHEMA).unwrap();
        assert_eq!(record.get("tag_serial_no").unwrap().as_u32(), Some(65011));
        assert_eq!(record.get("code_freq").unwrap().as_u16(), Some(69));
        assert_eq!(record.get("code_channel").unwrap().as_u16(), Some(9001));
        assert_eq!(record.get("detection_count").unwrap().as_u16(), Some(3));
        assert_eq!(record.get("code_char").unwrap().as_char(), Some('A'));
    }

    #[test]
    fn decode_is_deterministic() {
        let bytes = sample_record_bytes();
        let first = decode_record(&bytes, &DETECTION_SCHEMA).unwrap();
        let second = decode_record(&bytes, &DETECTION_SCHEMA).unwrap();
        for ((name_a, value_a), (name_b, value_b)) in first.iter().zip(second.iter()) {
            assert_eq!(name_a, name_b);
            assert_eq!(value_a, value_b);
        }
    }

    #[test]
    fn decode_rejects_short_and_long_slices() {
        for len in [0usize, 10, 12, 22] {
            let bytes = vec![0u8; len];
            let err = decode_record(&bytes, &DETECTION_SCHEMA).unwrap_err();
            assert!(matches!(
                err,
                DecodeError::SizeMismatch {
                    expected: 11,
                    actual
                } if actual == len
            ));
        }
    }
}
