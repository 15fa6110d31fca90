//! Error types for catalog operations
//!
//! Provides unified error handling for metadata and landmark loading.

use thiserror::Error;

/// Errors that can occur while loading catalog data
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The requested file does not exist (the HTTP 404 case)
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed, but the record is unusable
    #[error("Invalid record {id}: {reason}")]
    Invalid { id: String, reason: String },
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
