//! Detection-decoding core for the Bristlemouth Rx-LIVE acoustic tag receiver.
//!
//! The modules turn hex-encoded receiver payloads into enriched detection
//! records while keeping decode failures local to the reading or record
//! that produced them.

pub mod decoding;
pub mod enrich;
pub mod pipeline;
pub mod prelude;
pub mod receiver;
pub mod telemetry;

pub use prelude::{CountMode, DecodeError, DecodeResult, PipelineConfig};
