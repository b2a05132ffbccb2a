pub mod batch;

pub use batch::BatchResult;

use crate::decoding::{
    decode_record, unpack_detections, RecordSchema, SchemaError, DETECTION_RECORD_SIZE,
    DETECTION_SCHEMA,
};
use crate::enrich::{format_tag_identity, normalize_timestamp};
use crate::prelude::{DecodeResult, PipelineConfig};
use crate::receiver::{EnrichedDetection, SensorReading, TagDetection};
use crate::telemetry::{LogManager, MetricsRecorder};

/// Orchestrates unpack, decode, filter, and enrichment for batches of
/// sensor readings.
///
/// Construction validates the record schema and is the only place a hard
/// error can surface; [`DetectionPipeline::process`] itself never fails.
/// One malformed reading or record costs only that unit, never the batch.
pub struct DetectionPipeline {
    schema: RecordSchema,
    config: PipelineConfig,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl DetectionPipeline {
    /// Builds a pipeline over the fixed Rx-LIVE detection schema.
    pub fn new(config: PipelineConfig) -> Result<Self, SchemaError> {
        Self::with_schema(DETECTION_SCHEMA, DETECTION_RECORD_SIZE, config)
    }

    /// Builds a pipeline over an explicit schema and its wire record size.
    pub fn with_schema(
        schema: RecordSchema,
        record_size: usize,
        config: PipelineConfig,
    ) -> Result<Self, SchemaError> {
        schema.validate(record_size)?;
        Ok(Self {
            schema,
            config,
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        })
    }

    /// Decodes one fetched batch of readings into enriched detections.
    ///
    /// Readings are processed in input order and records in unpack order;
    /// no global time ordering is imposed here (see
    /// [`BatchResult::sorted_by_instant`]).
    pub fn process(&self, readings: &[SensorReading]) -> BatchResult {
        let mut result = BatchResult::default();

        for reading in readings {
            match self.process_reading(reading, &mut result) {
                Ok(()) => result.readings_processed += 1,
                Err(err) => {
                    self.logger
                        .warn(&format!("skipping reading at {}: {}", reading.timestamp, err));
                    self.metrics.record_skipped();
                    result.readings_skipped += 1;
                }
            }
        }

        self.logger.record(&format!(
            "batch decoded: {} detection(s), {} reading(s) skipped, {} record(s) skipped",
            result.len(),
            result.readings_skipped,
            result.records_skipped
        ));
        result
    }

    /// Cumulative (decoded, skipped) unit counts across all batches this
    /// pipeline has processed.
    pub fn metrics_snapshot(&self) -> (usize, usize) {
        self.metrics.snapshot()
    }

    fn process_reading(
        &self,
        reading: &SensorReading,
        result: &mut BatchResult,
    ) -> DecodeResult<()> {
        let normalized = normalize_timestamp(&reading.timestamp, self.config.local_time)?;
        let buffers = unpack_detections(
            &reading.value,
            self.schema.record_size(),
            self.config.count_mode,
        )?;

        for buffer in buffers {
            let detection = match decode_record(&buffer, &self.schema)
                .and_then(|record| TagDetection::try_from(&record))
            {
                Ok(detection) => detection,
                Err(err) => {
                    self.logger.warn(&format!(
                        "skipping record in reading at {}: {}",
                        reading.timestamp, err
                    ));
                    self.metrics.record_skipped();
                    result.records_skipped += 1;
                    continue;
                }
            };

            let tag_identity = format_tag_identity(&detection);
            if let Some(reference_tag) = &self.config.exclude_reference_tag {
                if &tag_identity == reference_tag {
                    result.records_excluded += 1;
                    continue;
                }
            }

            self.metrics.record_decoded();
            result.records_decoded += 1;
            result.detections.push(EnrichedDetection {
                tag_serial_no: detection.tag_serial_no,
                code_freq: detection.code_freq,
                code_channel: detection.code_channel,
                detection_count: detection.detection_count,
                code_char: detection.code_char,
                tag_identity,
                display_time: normalized.display.clone(),
                instant: normalized.instant,
                latitude: reading.latitude,
                longitude: reading.longitude,
            });
        }

        Ok(())
    }
}
