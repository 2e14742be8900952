//! Error types for blob storage.

use thiserror::Error;

/// Errors that can occur during blob operations.
#[derive(Debug, Error)]
pub enum BlobError {
    /// No blob is stored under the key.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// The key is malformed.
    #[error("invalid blob key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Filesystem failure.
    #[error("blob I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend cannot serve requests right now.
    #[error("blob store unavailable: {0}")]
    Unavailable(String),
}

impl BlobError {
    /// Whether the error means the key is simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlobError::NotFound(_))
    }
}
