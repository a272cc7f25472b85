//! Error types for the stepdown crate

use thiserror::Error;

/// Result type alias for stepdown operations
pub type Result<T> = std::result::Result<T, StepdownError>;

/// Main error type for the stepdown crate
#[derive(Error, Debug)]
pub enum StepdownError {
    #[error("Missing value at row {row}")]
    MissingValue { row: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Run canceled")]
    Canceled,

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Malformed trace: {0}")]
    MalformedTrace(String),
}

impl From<polars::error::PolarsError> for StepdownError {
    fn from(err: polars::error::PolarsError) -> Self {
        StepdownError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for StepdownError {
    fn from(err: serde_json::Error) -> Self {
        StepdownError::SerializationError(err.to_string())
    }
}
