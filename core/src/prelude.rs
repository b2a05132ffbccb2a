use serde::{Deserialize, Serialize};

/// Common error type for decode-time failures.
///
/// Every variant is local to one reading or one record; the pipeline
/// swallows these and keeps going. Only [`crate::decoding::SchemaError`]
/// propagates as a hard failure.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("invalid hex payload: {0}")]
    InvalidHex(String),
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("unknown field type for '{0}'")]
    UnknownFieldType(String),
    #[error("declared record count {declared} but {actual} records present")]
    CountMismatch { declared: u32, actual: usize },
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// How to treat the declared record count in a payload header.
///
/// The receiver firmware writes a count it does not always honor, so the
/// default is to treat it as advisory and decode whatever full records are
/// actually present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountMode {
    Advisory,
    Strict,
}

impl Default for CountMode {
    fn default() -> Self {
        CountMode::Advisory
    }
}

/// Shared configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Canonical tag identity to drop from the output, typically a fixed
    /// reference transmitter such as `A69-9001-65011`.
    pub exclude_reference_tag: Option<String>,
    /// Render display timestamps in the local zone instead of UTC.
    pub local_time: bool,
    pub count_mode: CountMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            exclude_reference_tag: None,
            local_time: false,
            count_mode: CountMode::Advisory,
        }
    }
}
