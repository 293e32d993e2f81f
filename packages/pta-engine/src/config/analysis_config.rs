//! Analysis configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use crate::features::points_to::domain::WorklistOrder;

/// Heap abstraction used to name objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeapModelKind {
    /// One object per allocation statement
    #[default]
    AllocationSite,
    /// One object per allocated type
    TypeBased,
}

impl HeapModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllocationSite => "allocation_site",
            Self::TypeBased => "type_based",
        }
    }
}

/// How call edges are discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallGraphAlgorithm {
    /// On the fly, from receiver points-to sets
    #[default]
    Pta,
    /// Class hierarchy analysis from declared types
    Cha,
}

impl CallGraphAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pta => "pta",
            Self::Cha => "cha",
        }
    }
}

impl FromStr for CallGraphAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pta" => Ok(Self::Pta),
            "cha" => Ok(Self::Cha),
            other => Err(ConfigError::Validation(format!(
                "unknown call graph algorithm '{}', expected pta or cha",
                other
            ))),
        }
    }
}

impl fmt::Display for CallGraphAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Heap abstraction
    pub heap_model: HeapModelKind,

    /// Call graph construction
    pub call_graph_algorithm: CallGraphAlgorithm,

    /// Worklist processing order (does not change results)
    pub worklist_order: WorklistOrder,

    /// Emit solver statistics at info level when done
    pub log_statistics: bool,

    /// Cap on objects listed per variable in reports
    pub max_report_objects: usize,
}

impl AnalysisConfig {
    pub const MAX_REPORT_OBJECTS_LIMIT: usize = 10_000;

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_report_objects == 0 || self.max_report_objects > Self::MAX_REPORT_OBJECTS_LIMIT {
            return Err(ConfigError::range_with_hint(
                "max_report_objects",
                self.max_report_objects,
                1,
                Self::MAX_REPORT_OBJECTS_LIMIT,
                "Reports list at least one object per variable",
            ));
        }
        Ok(())
    }

    /// Builder: Set heap_model
    pub fn heap_model(mut self, v: HeapModelKind) -> Self {
        self.heap_model = v;
        self
    }

    /// Builder: Set call_graph_algorithm
    pub fn call_graph_algorithm(mut self, v: CallGraphAlgorithm) -> Self {
        self.call_graph_algorithm = v;
        self
    }

    /// Builder: Set worklist_order
    pub fn worklist_order(mut self, v: WorklistOrder) -> Self {
        self.worklist_order = v;
        self
    }

    /// Builder: Set log_statistics
    pub fn log_statistics(mut self, v: bool) -> Self {
        self.log_statistics = v;
        self
    }

    /// Builder: Set max_report_objects
    pub fn max_report_objects(mut self, v: usize) -> Self {
        self.max_report_objects = v;
        self
    }

    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Precise => Self {
                heap_model: HeapModelKind::AllocationSite,
                call_graph_algorithm: CallGraphAlgorithm::Pta,
                worklist_order: WorklistOrder::Fifo,
                log_statistics: true,
                max_report_objects: 100,
            },
            Preset::Fast => Self {
                heap_model: HeapModelKind::TypeBased,
                call_graph_algorithm: CallGraphAlgorithm::Pta,
                worklist_order: WorklistOrder::Lifo,
                log_statistics: false,
                max_report_objects: 20,
            },
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Precise)
    }
}
