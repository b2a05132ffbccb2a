use serde::{Deserialize, Serialize};

/// Semantic type of one field in a fixed-layout detection record.
///
/// A closed set: the receiver firmware only ever emits these three shapes.
/// Each variant knows its own byte width and how to decode itself, so the
/// decoder never consults a lookup table keyed by strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Unsigned32,
    Unsigned16,
    Char,
}

impl FieldKind {
    pub const fn width(self) -> usize {
        match self {
            FieldKind::Unsigned32 => 4,
            FieldKind::Unsigned16 => 2,
            FieldKind::Char => 1,
        }
    }
}

/// One named field in a record layout.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Structural misconfiguration of a record schema.
///
/// Unlike [`crate::prelude::DecodeError`] this is a load-time failure and
/// propagates to the caller as a hard error.
#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    #[error("schema widths sum to {actual} bytes, expected record size {expected}")]
    WidthMismatch { expected: usize, actual: usize },
    #[error("schema has no fields")]
    Empty,
}

/// Ordered, immutable description of one fixed-size binary record.
///
/// Constructed once as a constant; a future record revision would be a
/// different constant instance handed to the same decoder.
#[derive(Debug, Clone, Copy)]
pub struct RecordSchema {
    fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Total byte width of one record under this schema.
    pub fn record_size(&self) -> usize {
        self.fields.iter().map(|field| field.kind.width()).sum()
    }

    /// Checks the schema against the wire-format record size it claims to
    /// describe.
    pub fn validate(&self, expected_size: usize) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        let actual = self.record_size();
        if actual != expected_size {
            return Err(SchemaError::WidthMismatch {
                expected: expected_size,
                actual,
            });
        }
        Ok(())
    }
}

/// Fixed wire size of one Rx-LIVE detection record.
pub const DETECTION_RECORD_SIZE: usize = 11;

/// Layout of one Rx-LIVE detection record, little-endian throughout.
pub const DETECTION_SCHEMA: RecordSchema = RecordSchema::new(&[
    FieldSpec {
        name: "tag_serial_no",
        kind: FieldKind::Unsigned32,
    },
    FieldSpec {
        name: "code_freq",
        kind: FieldKind::Unsigned16,
    },
    FieldSpec {
        name: "code_channel",
        kind: FieldKind::Unsigned16,
    },
    FieldSpec {
        name: "detection_count",
        kind: FieldKind::Unsigned16,
    },
    FieldSpec {
        name: "code_char",
        kind: FieldKind::Char,
    },
]);
