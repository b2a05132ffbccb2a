use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use rxcore::pipeline::DetectionPipeline;
use rxcore::receiver::{EnrichedDetection, SensorReading};

pub struct WorkflowResult {
    pub detections: Vec<EnrichedDetection>,
    pub detection_count: usize,
    pub readings_skipped: usize,
    pub records_skipped: usize,
    pub records_excluded: usize,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn execute(&self, readings: &[SensorReading]) -> anyhow::Result<WorkflowResult> {
        let pipeline = DetectionPipeline::new(self.config.to_pipeline_config())
            .context("building detection pipeline")?;
        let batch = pipeline.process(readings);

        // Chronological order for tables and time-series downstream.
        let detections = batch.sorted_by_instant();
        let detection_count = detections.len();

        Ok(WorkflowResult {
            detections,
            detection_count,
            readings_skipped: batch.readings_skipped,
            records_skipped: batch.records_skipped,
            records_excluded: batch.records_excluded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fixture::{build_fixture_batch, FixtureConfig};

    #[test]
    fn runner_executes_workflow() {
        let cfg = WorkflowConfig::from_args(
            "SPOT-32255C".into(),
            "2025-06-07T00:00:00Z".into(),
            None,
            false,
            false,
        );
        let runner = Runner::new(cfg);
        let fixture = FixtureConfig {
            readings: 3,
            records_per_reading: 2,
            ..Default::default()
        };
        let readings = build_fixture_batch(&fixture).unwrap();
        let result = runner.execute(&readings).unwrap();
        assert_eq!(result.detection_count, 6);
        assert_eq!(result.readings_skipped, 0);
    }

    #[test]
    fn runner_excludes_reference_tag() {
        let fixture = FixtureConfig {
            readings: 2,
            records_per_reading: 3,
            include_reference_tag: true,
            ..Default::default()
        };
        let readings = build_fixture_batch(&fixture).unwrap();

        let cfg = WorkflowConfig::from_args(
            "SPOT-32255C".into(),
            "2025-06-07T00:00:00Z".into(),
            Some(crate::generator::fixture::REFERENCE_TAG_IDENTITY.into()),
            false,
            false,
        );
        let result = Runner::new(cfg).execute(&readings).unwrap();

        // One reference record per reading was injected and excluded.
        assert_eq!(result.detection_count, 2 * 3 - 2);
        assert_eq!(result.records_excluded, 2);
    }

    #[test]
    fn runner_sorts_detections_chronologically() {
        let fixture = FixtureConfig {
            readings: 4,
            records_per_reading: 1,
            ..Default::default()
        };
        let readings = build_fixture_batch(&fixture).unwrap();
        let cfg = WorkflowConfig::from_args(
            "SPOT-32255C".into(),
            "2025-06-07T00:00:00Z".into(),
            None,
            false,
            false,
        );
        let result = Runner::new(cfg).execute(&readings).unwrap();
        let instants: Vec<_> = result.detections.iter().map(|d| d.instant).collect();
        let mut sorted = instants.clone();
        sorted.sort();
        assert_eq!(instants, sorted);
    }
}
