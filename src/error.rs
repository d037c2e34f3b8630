//! Error types for the filecat catalog.

use crate::types::RecordKey;
use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Record already exists: {0}")]
    RecordExists(RecordKey),

    #[error("Record not found: {0}")]
    RecordNotFound(RecordKey),

    #[error("Catalog backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("Failed to encode or decode catalog row: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Invalid search pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level errors surfaced by the CLI and the update pipeline
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Cannot walk {path}: {reason}")]
    WalkFailed { path: PathBuf, reason: String },

    #[error("Failed to create catalog directory {path}: {source}")]
    CatalogDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Update pipeline failed: {0}")]
    Runtime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for CatalogError {
    fn from(err: config::ConfigError) -> Self {
        CatalogError::ConfigError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for CatalogError {
    fn from(err: tokio::task::JoinError) -> Self {
        CatalogError::Runtime(err.to_string())
    }
}
