//! Shared handler state

use axum::response::Html;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use super::errors::{WebError, WebResult};
use super::templates::TemplateRegistry;
use crate::catalog::Catalog;
use crate::observability::Event;

/// State shared by every handler, built once before the listener binds
#[derive(Debug)]
pub struct AppState {
    pub catalog: Catalog,
    pub templates: TemplateRegistry,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: Catalog, templates: TemplateRegistry) -> Self {
        Self {
            catalog,
            templates,
            started_at: Utc::now(),
        }
    }

    /// Render page `name` as an HTML response
    pub fn page<T: Serialize>(&self, name: &str, data: &T) -> WebResult<Html<String>> {
        self.templates.render(name, data).map(Html).map_err(|e| {
            error!(event = Event::RenderFailed.as_str(), page = name, error = %e, "page render failed");
            WebError::from(e)
        })
    }
}
