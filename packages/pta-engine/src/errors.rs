//! Error types for pta-engine
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::program::ProgramError;

/// Main error type for analysis operations
#[derive(Debug, Error)]
pub enum PtaError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Program construction or loading error
    #[error("Program error: {0}")]
    Program(#[from] ProgramError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A method reference names no method in its class or any supertype
    #[error("Unresolved method reference: {class}.{subsignature}")]
    UnresolvedMethod { class: String, subsignature: String },

    /// A field reference names no field in its class or any superclass
    #[error("Unresolved field reference: {class}.{field}")]
    UnresolvedField { class: String, field: String },

    /// The program has no designated entry method
    #[error("Program has no entry method")]
    NoEntryMethod,

    /// Serialization of results failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PtaError {
    /// Create an unresolved method error
    pub fn unresolved_method(class: impl Into<String>, subsignature: impl Into<String>) -> Self {
        PtaError::UnresolvedMethod {
            class: class.into(),
            subsignature: subsignature.into(),
        }
    }

    /// Create an unresolved field error
    pub fn unresolved_field(class: impl Into<String>, field: impl Into<String>) -> Self {
        PtaError::UnresolvedField {
            class: class.into(),
            field: field.into(),
        }
    }

    /// True for the "unresolved reference" family
    pub fn is_unresolved_reference(&self) -> bool {
        matches!(
            self,
            PtaError::UnresolvedMethod { .. } | PtaError::UnresolvedField { .. }
        )
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, PtaError>;
