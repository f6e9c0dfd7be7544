//! Error type for the storage and serialization boundary.

use thiserror::Error;

/// Errors surfaced by repositories and the serializer.
#[derive(Debug, Error)]
pub enum LrsError {
    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LrsError>;
