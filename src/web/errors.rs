//! # Web Errors
//!
//! Failures surface as plain-text bodies; there are no error pages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

use super::templates::TemplateError;
use crate::catalog::CatalogError;
use crate::observability::Event;

/// Result type for handlers
pub type WebResult<T> = Result<T, WebError>;

/// Errors a handler can answer with
#[derive(Debug, Error)]
pub enum WebError {
    /// Key lookup failed
    #[error("{0}")]
    Get(CatalogError),

    /// View query failed
    #[error("Error: {0}")]
    Query(CatalogError),

    /// Page could not be rendered
    #[error("Error: {0}")]
    Render(#[from] TemplateError),
}

impl From<CatalogError> for WebError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::View { .. } => WebError::Query(err),
            _ => WebError::Get(err),
        }
    }
}

/// Log a failed catalog read and turn it into a handler error
pub fn catalog_failure(err: CatalogError) -> WebError {
    let event = match err {
        CatalogError::View { .. } => Event::ViewQueryFailed,
        _ => Event::GetFailed,
    };
    warn!(event = event.as_str(), error = %err, "catalog read failed");
    WebError::from(err)
}

impl WebError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::Get(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            WebError::Get(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, format!("{}\n", self)).into_response()
    }
}
