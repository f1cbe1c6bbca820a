//! Error types for BucketKV
//!
//! Provides a unified error type for all table operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using TableError
pub type Result<T> = std::result::Result<T, TableError>;

/// Unified error type for BucketKV operations
#[derive(Debug, Error)]
pub enum TableError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Key not found: {0}")]
    KeyNotFound(i64),

    // -------------------------------------------------------------------------
    // Bucket Errors
    // -------------------------------------------------------------------------
    #[error("Corrupt bucket {path}: {source}")]
    CorruptBucket {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // -------------------------------------------------------------------------
    // WAL Errors
    // -------------------------------------------------------------------------
    #[error("Log not found: {0}")]
    LogNotFound(PathBuf),

    #[error("Invalid log format at line {line}: {content:?}")]
    InvalidLogFormat { line: usize, content: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
