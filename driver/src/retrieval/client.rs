use anyhow::Context;
use rxcore::receiver::SensorReading;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.sofarocean.com";

/// Parameters for one sensor-data fetch, as submitted by the visualizer or
/// the CLI. The token is opaque and passed through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRequest {
    pub spotter_id: String,
    pub token: String,
    pub start_date: String,
    #[serde(default)]
    pub exclude_reference_tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SensorDataResponse {
    #[serde(default)]
    data: Vec<SensorReading>,
}

/// Thin client for the Sofar sensor-data endpoint. The decoding core only
/// sees the resulting `Vec<SensorReading>` and does not care how it was
/// fetched.
pub struct SensorApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl SensorApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_readings(
        &self,
        token: &str,
        spotter_id: &str,
        start_date: &str,
    ) -> anyhow::Result<Vec<SensorReading>> {
        let url = format!("{}/api/sensor-data", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("token", token),
                ("spotterId", spotter_id),
                ("startDate", start_date),
            ])
            .send()
            .await
            .with_context(|| format!("requesting sensor data for {spotter_id}"))?;

        if !response.status().is_success() {
            anyhow::bail!("sensor-data request failed with status {}", response.status());
        }

        let body: SensorDataResponse = response
            .json()
            .await
            .context("parsing sensor-data response body")?;
        Ok(body.data)
    }
}

impl Default for SensorApiClient {
    fn default() -> Self {
        Self::new()
    }
}
