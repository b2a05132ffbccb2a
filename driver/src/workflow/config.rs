use anyhow::Context;
use rxcore::prelude::{CountMode, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub spotter_id: String,
    pub start_date: String,
    /// Tag identity dropped from results; `None` keeps everything.
    pub exclude_reference_tag: Option<String>,
    #[serde(default)]
    pub local_time: bool,
    /// Fail readings whose declared record count disagrees with the
    /// records actually present.
    #[serde(default)]
    pub strict_count: bool,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        spotter_id: String,
        start_date: String,
        exclude_reference_tag: Option<String>,
        local_time: bool,
        strict_count: bool,
    ) -> Self {
        Self {
            spotter_id,
            start_date,
            exclude_reference_tag,
            local_time,
            strict_count,
        }
    }

    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            exclude_reference_tag: self.exclude_reference_tag.clone(),
            local_time: self.local_time,
            count_mode: if self.strict_count {
                CountMode::Strict
            } else {
                CountMode::Advisory
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_pipeline_config() {
        let cfg = WorkflowConfig::from_args(
            "SPOT-32255C".into(),
            "2025-06-07T00:00:00Z".into(),
            Some("A69-9001-65011".into()),
            false,
            true,
        );
        let pipeline_cfg = cfg.to_pipeline_config();
        assert_eq!(
            pipeline_cfg.exclude_reference_tag.as_deref(),
            Some("A69-9001-65011")
        );
        assert_eq!(pipeline_cfg.count_mode, CountMode::Strict);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"spotter_id: SPOT-32255C\nstart_date: 2025-06-07T00:00:00Z\nexclude_reference_tag: A69-9001-65011\nlocal_time: true\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.spotter_id, "SPOT-32255C");
        assert!(cfg.local_time);
        assert!(!cfg.strict_count);
    }
}
