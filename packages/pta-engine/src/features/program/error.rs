//! Program construction errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("Duplicate class '{0}'")]
    DuplicateClass(String),

    #[error("Unknown class '{0}'")]
    UnknownClass(String),

    #[error("Duplicate method {class}.{subsignature}")]
    DuplicateMethod { class: String, subsignature: String },

    #[error("Duplicate field {class}.{field}")]
    DuplicateField { class: String, field: String },

    #[error("Unknown entry method '{0}'")]
    UnknownEntry(String),

    #[error("Malformed program description: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ProgramResult<T> = std::result::Result<T, ProgramError>;
