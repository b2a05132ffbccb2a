pub mod detection;
pub mod reading;

pub use detection::{EnrichedDetection, TagDetection};
pub use reading::SensorReading;
