//! Analysis configuration
//!
//! Builder API, presets and versioned YAML files:
//!
//! ```text
//! let config = AnalysisConfig::from_preset(Preset::Fast)
//!     .worklist_order(WorklistOrder::Fifo)
//!     .max_report_objects(50);
//! config.validate()?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;
pub mod preset;

pub use analysis_config::{AnalysisConfig, CallGraphAlgorithm, HeapModelKind};
pub use error::{ConfigError, ConfigResult};
pub use io::{from_yaml_str, load_config, save_config, to_yaml_string};
pub use preset::Preset;
