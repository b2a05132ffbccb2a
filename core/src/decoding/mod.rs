pub mod record;
pub mod schema;
pub mod unpack;

pub use record::{decode_record, DecodedRecord, FieldValue};
pub use schema::{
    FieldKind, FieldSpec, RecordSchema, SchemaError, DETECTION_RECORD_SIZE, DETECTION_SCHEMA,
};
pub use unpack::unpack_detections;
