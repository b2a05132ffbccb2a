pub mod client;

pub use client::{FetchRequest, SensorApiClient};
