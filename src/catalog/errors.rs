//! # Catalog Errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog access errors, tagged with the operation that failed
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Get Error: {source}")]
    Get {
        id: String,
        #[source]
        source: StoreError,
    },

    #[error("View query {view} failed: {source}")]
    View {
        view: String,
        #[source]
        source: StoreError,
    },

    #[error("Write Error: {source}")]
    Write {
        id: String,
        #[source]
        source: StoreError,
    },

    #[error("Remove Error: {source}")]
    Remove {
        id: String,
        #[source]
        source: StoreError,
    },
}

impl CatalogError {
    /// The underlying store error
    pub fn store_error(&self) -> &StoreError {
        match self {
            CatalogError::Get { source, .. }
            | CatalogError::View { source, .. }
            | CatalogError::Write { source, .. }
            | CatalogError::Remove { source, .. } => source,
        }
    }

    /// Whether the failure was a missing document
    pub fn is_not_found(&self) -> bool {
        self.store_error().is_not_found()
    }
}
