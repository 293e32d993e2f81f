//! Configuration I/O (YAML)
//!
//! ```yaml
//! version: 1
//! preset: fast
//! overrides:
//!   worklist_order: fifo
//!   max_report_objects: 50
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::analysis_config::{AnalysisConfig, CallGraphAlgorithm, HeapModelKind};
use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use crate::features::points_to::domain::WorklistOrder;

pub const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default)]
    pub preset: Preset,

    /// Fine-grained overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Fields applied on top of the preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heap_model: Option<HeapModelKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_graph_algorithm: Option<CallGraphAlgorithm>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub worklist_order: Option<WorklistOrder>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_statistics: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_report_objects: Option<usize>,
}

impl ConfigOverrides {
    fn apply(self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(v) = self.heap_model {
            config.heap_model = v;
        }
        if let Some(v) = self.call_graph_algorithm {
            config.call_graph_algorithm = v;
        }
        if let Some(v) = self.worklist_order {
            config.worklist_order = v;
        }
        if let Some(v) = self.log_statistics {
            config.log_statistics = v;
        }
        if let Some(v) = self.max_report_objects {
            config.max_report_objects = v;
        }
        config
    }

    fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            heap_model: Some(config.heap_model),
            call_graph_algorithm: Some(config.call_graph_algorithm),
            worklist_order: Some(config.worklist_order),
            log_statistics: Some(config.log_statistics),
            max_report_objects: Some(config.max_report_objects),
        }
    }
}

/// Parse and validate a versioned YAML document
pub fn from_yaml_str(content: &str) -> ConfigResult<AnalysisConfig> {
    let export: ConfigExportV1 = serde_yaml::from_str(content)?;

    let version = export.version.ok_or(ConfigError::MissingVersion)?;
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(ConfigError::UnsupportedVersion {
            found: version,
            supported: SUPPORTED_VERSIONS.to_vec(),
        });
    }

    let base = AnalysisConfig::from_preset(export.preset);
    let config = match export.overrides {
        Some(overrides) => overrides.apply(base),
        None => base,
    };
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<AnalysisConfig> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

/// Serialize with every field spelled out over the given preset
pub fn to_yaml_string(config: &AnalysisConfig, preset: Preset) -> ConfigResult<String> {
    let export = ConfigExportV1 {
        version: Some(1),
        preset,
        overrides: Some(ConfigOverrides::from_config(config)),
    };
    Ok(serde_yaml::to_string(&export)?)
}

pub fn save_config(config: &AnalysisConfig, preset: Preset, path: impl AsRef<Path>) -> ConfigResult<()> {
    let yaml = to_yaml_string(config, preset)?;
    std::fs::write(path, yaml)?;
    Ok(())
}
