//! Core error types for quadrant-core.
//!
//! This module defines the error hierarchy using thiserror so that every
//! fallible operation in the library reports a typed, matchable failure.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for quadrant-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Import document errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Failed to serialize an entry before writing it
    #[error("Failed to encode entry '{entry}': {source}")]
    Encode {
        entry: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Data directory could not be created or resolved
    #[error("Failed to prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),

    /// Write rejected by the backend
    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be created or resolved
    #[error("Failed to prepare config directory: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Validation errors raised by task store operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Task text is empty after trimming
    #[error("Task text must not be empty")]
    EmptyText,

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// The same task id appears more than once
    #[error("Duplicate task id: {0}")]
    DuplicateId(String),

    /// A string does not name one of the four quadrants
    #[error("Unknown quadrant key: {0}")]
    UnknownQuadrant(String),
}

/// Errors raised while decoding an imported document.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The raw text is not well-formed JSON
    #[error("Not a valid JSON document: {0}")]
    Document(#[source] serde_json::Error),

    /// The document does not match the four-quadrant task schema
    #[error("Document does not match the task schema: {0}")]
    Schema(String),
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
