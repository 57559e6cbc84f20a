//! Error types
//!
//! `StoreError` is the narrow taxonomy returned by the document store. Callers
//! branch on it; neither variant is fatal. `ApiError` covers the layers around
//! the store (configuration, generation, CLI).

use crate::types::NodeId;
use thiserror::Error;

/// Result of a store operation that referenced a missing node or would break
/// the tree shape. The forest is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, StoreError::InvalidOperation(_))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
