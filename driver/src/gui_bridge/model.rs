use rxcore::receiver::EnrichedDetection;
use serde::{Deserialize, Serialize};

#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub detections: Vec<EnrichedDetection>,
    pub detection_count: usize,
    pub readings_skipped: usize,
    pub records_skipped: usize,
    pub records_excluded: usize,
}

#[allow(dead_code)]
impl VisualizationModel {
    pub fn new() -> Self {
        Self {
            detections: Vec::new(),
            detection_count: 0,
            readings_skipped: 0,
            records_skipped: 0,
            records_excluded: 0,
        }
    }

    pub fn from_result(result: &crate::workflow::runner::WorkflowResult) -> Self {
        Self {
            detections: result.detections.clone(),
            detection_count: result.detection_count,
            readings_skipped: result.readings_skipped,
            records_skipped: result.records_skipped,
            records_excluded: result.records_excluded,
        }
    }
}
