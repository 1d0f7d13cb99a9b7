//! Error types for the record grid

use thiserror::Error;

/// Core error type for grid configuration and record loading
///
/// Grid operations themselves never fail: these errors only come out of
/// building a grid or turning external data into records.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    #[error("Grid configuration has no identity field")]
    MissingIdentity,

    #[error("Duplicate filter bucket '{bucket}' on field '{field}'")]
    DuplicateBucket { field: String, bucket: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for grid operations
pub type Result<T> = std::result::Result<T, GridError>;
