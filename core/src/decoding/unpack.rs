use crate::prelude::{CountMode, DecodeError, DecodeResult};
use log::debug;

/// Width of the record-count header at the front of every payload.
const COUNT_HEADER_WIDTH: usize = 4;

/// Splits one hex-encoded receiver payload into raw fixed-size record
/// buffers.
///
/// The payload starts with a little-endian u32 declared record count,
/// followed by consecutive `record_size`-byte records. Trailing bytes that
/// do not fill a whole record are discarded. In [`CountMode::Advisory`] a
/// count that disagrees with the records actually present is only logged;
/// [`CountMode::Strict`] turns it into an error.
pub fn unpack_detections(
    hex_value: &str,
    record_size: usize,
    count_mode: CountMode,
) -> DecodeResult<Vec<Vec<u8>>> {
    let payload = hex::decode(hex_value.trim())
        .map_err(|err| DecodeError::InvalidHex(err.to_string()))?;

    if payload.len() < COUNT_HEADER_WIDTH {
        return Err(DecodeError::SizeMismatch {
            expected: COUNT_HEADER_WIDTH,
            actual: payload.len(),
        });
    }

    let declared = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
    let body = &payload[COUNT_HEADER_WIDTH..];

    let records: Vec<Vec<u8>> = body
        .chunks_exact(record_size)
        .map(|chunk| chunk.to_vec())
        .collect();

    if declared as usize != records.len() {
        match count_mode {
            CountMode::Strict => {
                return Err(DecodeError::CountMismatch {
                    declared,
                    actual: records.len(),
                });
            }
            CountMode::Advisory => {
                debug!(
                    "payload declares {} record(s) but {} present, decoding what is there",
                    declared,
                    records.len()
                );
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD_SIZE: usize = 11;

    fn record_bytes(serial: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&serial.to_le_bytes());
        bytes.extend_from_slice(&69u16.to_le_bytes());
        bytes.extend_from_slice(&9001u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.push(b'A');
        bytes
    }

    fn payload_hex(count: u32, records: &[Vec<u8>], trailing: &[u8]) -> String {
        let mut payload = count.to_le_bytes().to_vec();
        for record in records {
            payload.extend_from_slice(record);
        }
        payload.extend_from_slice(trailing);
        hex::encode(payload)
    }

    #[test]
    fn unpack_yields_declared_records_in_order() {
        let records = vec![record_bytes(100), record_bytes(200)];
        let hex_value = payload_hex(2, &records, &[]);
        let unpacked = unpack_detections(&hex_value, RECORD_SIZE, CountMode::Advisory).unwrap();
        assert_eq!(unpacked, records);
    }

    #[test]
    fn unpack_discards_trailing_partial_record() {
        let records = vec![record_bytes(100), record_bytes(200)];
        let with_trailing = payload_hex(2, &records, &[0xde, 0xad, 0xbe, 0xef]);
        let without_trailing = payload_hex(2, &records, &[]);
        assert_eq!(
            unpack_detections(&with_trailing, RECORD_SIZE, CountMode::Advisory).unwrap(),
            unpack_detections(&without_trailing, RECORD_SIZE, CountMode::Advisory).unwrap()
        );
    }

    #[test]
    fn unpack_rejects_malformed_hex() {
        let err = unpack_detections("zz00", RECORD_SIZE, CountMode::Advisory).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidHex(_)));
    }

    #[test]
    fn unpack_rejects_truncated_count_header() {
        let err = unpack_detections("0100", RECORD_SIZE, CountMode::Advisory).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SizeMismatch {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn advisory_mode_tolerates_count_mismatch() {
        let records = vec![record_bytes(100)];
        let hex_value = payload_hex(5, &records, &[]);
        let unpacked = unpack_detections(&hex_value, RECORD_SIZE, CountMode::Advisory).unwrap();
        assert_eq!(unpacked.len(), 1);
    }

    #[test]
    fn strict_mode_rejects_count_mismatch() {
        let records = vec![record_bytes(100)];
        let hex_value = payload_hex(5, &records, &[]);
        let err = unpack_detections(&hex_value, RECORD_SIZE, CountMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::CountMismatch {
                declared: 5,
                actual: 1
            }
        ));
    }

    #[test]
    fn empty_body_yields_no_records() {
        let hex_value = payload_hex(0, &[], &[]);
        let unpacked = unpack_detections(&hex_value, RECORD_SIZE, CountMode::Strict).unwrap();
        assert!(unpacked.is_empty());
    }
}
