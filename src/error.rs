//! Error types for payload packaging and publishing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a source directory into archive bytes
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Source directory not found: {0:?}")]
    DirectoryNotFound(PathBuf),

    #[error("Failed to read file {path:?}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Duplicate archive entry after normalization: {0}")]
    DuplicateEntry(String),

    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Archive write error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Errors raised by an artifact store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store location not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Store rejected object {key}: {reason}")]
    Rejected { key: String, reason: String },

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level errors surfaced to callers and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid function name '{name}': {reason}")]
    InvalidFunctionName { name: String, reason: String },

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
