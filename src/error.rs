//! Error types for remote operations, durable storage and configuration.

use crate::model::PhotoId;
use std::time::Duration;
use thiserror::Error;

/// Failure of a collection read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Request never produced a response
    #[error("photo fetch failed: {0}")]
    Network(String),
    /// Remote answered with a non-success status
    #[error("photo fetch rejected with status {0}")]
    Status(u16),
    /// Response body was not a photo list
    #[error("photo list could not be decoded: {0}")]
    Decode(String),
    #[error("photo fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure of a photo upload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    /// Caller-supplied fields were rejected before sending
    #[error("invalid upload: {0}")]
    Invalid(String),
    #[error("upload rejected: {0}")]
    Rejected(String),
    #[error("upload failed: {0}")]
    Network(String),
    #[error("upload timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure of an RGB edit or grayscale conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("photo {0} does not exist")]
    NotFound(PhotoId),
    #[error("edit rejected: {0}")]
    Rejected(String),
    #[error("edit failed: {0}")]
    Network(String),
    #[error("edit timed out after {0:?}")]
    Timeout(Duration),
}

/// Durable storage could not be reached. Stores degrade instead of returning this.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Unavailable(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid client configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
