use crate::receiver::EnrichedDetection;
use serde::{Deserialize, Serialize};

/// Best-effort outcome of one pipeline run.
///
/// Always produced, even when every input was malformed; skip counters let
/// callers surface how much of the batch was dropped instead of failing it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub detections: Vec<EnrichedDetection>,
    pub readings_processed: usize,
    pub readings_skipped: usize,
    pub records_decoded: usize,
    pub records_skipped: usize,
    pub records_excluded: usize,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Detections in chronological order. The sort is stable, so records
    /// sharing an instant keep their arrival order.
    pub fn sorted_by_instant(&self) -> Vec<EnrichedDetection> {
        let mut sorted = self.detections.clone();
        sorted.sort_by_key(|detection| detection.instant);
        sorted
    }
}
