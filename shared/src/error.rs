//! Engine error types

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the engine's fallible operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Crop not found: {0}")]
    CropNotFound(Uuid),

    #[error("Invalid observation field {field}: {message}")]
    InvalidObservation {
        field: &'static str,
        message: &'static str,
    },

    #[error("top_k must be at least 1")]
    InvalidTopK,
}

/// Result alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
