//! # Document Store Errors

use thiserror::Error;

/// Result type for document store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    // Key errors
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Document already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid document key: {0:?}")]
    InvalidKey(String),

    // Body errors
    #[error("Failed to decode document {id}: {reason}")]
    Decode { id: String, reason: String },

    #[error("Failed to encode document {id}: {reason}")]
    Encode { id: String, reason: String },

    // View errors
    #[error("View not found: {design}/{view}")]
    ViewNotFound { design: String, view: String },

    // Connection errors
    #[error("Unsupported store endpoint: {0}")]
    UnsupportedEndpoint(String),

    #[error("I/O error: {0}")]
    Io(String),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Whether the error means the key does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
