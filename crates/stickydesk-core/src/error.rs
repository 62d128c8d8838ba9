//! Core error types for stickydesk-core.
//!
//! Load failures never surface here: a missing or corrupt document is
//! replaced by its defaults inside [`crate::storage::JsonStore::load`].
//! What remains are save failures (reported, never fatal) and validation
//! failures on user input.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stickydesk-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read a document
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document exists but is not valid JSON for its type
    #[error("Failed to parse {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize a document
    #[error("Failed to serialize document for {path}: {source}")]
    SerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write or replace a document
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data directory could not be prepared
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Focus duration outside 1..=90
    #[error("Focus time must be {min}-{max} minutes (got {value})")]
    FocusMinutes { value: i64, min: u32, max: u32 },

    /// Break duration outside 1..=30
    #[error("Break time must be {min}-{max} minutes (got {value})")]
    BreakMinutes { value: i64, min: u32, max: u32 },

    /// Not a `#RRGGBB` color
    #[error("Invalid color '{0}': expected #RRGGBB")]
    HexColor(String),

    /// Not a `YYYY-MM-DD` date
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    DateKey(String),

    /// Hour outside 0..=23
    #[error("Invalid hour {0}: expected 0-23")]
    Hour(u32),

    /// Year outside 1..=9999
    #[error("Invalid year {0}: expected 1-9999")]
    Year(i32),

    /// Month outside 1..=12
    #[error("Invalid month {0}: expected 1-12")]
    Month(u32),

    /// Not one of the known widget names
    #[error("Unknown widget '{0}'")]
    UnknownWidget(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
