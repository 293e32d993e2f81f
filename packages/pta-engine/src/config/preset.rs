//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Allocation-site heap, on-the-fly call graph
    #[default]
    Precise,

    /// Type-based heap: one object per allocated type.
    /// Fewer objects and pointers, coarser aliasing.
    Fast,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Precise => "precise",
            Self::Fast => "fast",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "precise" => Ok(Self::Precise),
            "fast" => Ok(Self::Fast),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Fast".parse::<Preset>().unwrap(), Preset::Fast);
        assert_eq!("precise".parse::<Preset>().unwrap(), Preset::Precise);
        assert!(matches!(
            "thorough".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(_))
        ));
        assert_eq!(Preset::default().to_string(), "precise");
    }
}
