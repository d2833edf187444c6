//! Page templates
//!
//! Every page is a handlebars template wrapped in the shared layout: the
//! page body is registered as the inline partial `page`, which
//! `layout.html` pulls in with `{{> page}}`.
//!
//! The registry is built once at startup and never changes afterwards;
//! edits to template files take effect on the next restart.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;
use thiserror::Error;

use super::redirect::path_segment;

/// Helper that percent-encodes an id for use inside a link path
pub const SEGMENT_HELPER: &str = "segment";

/// `{{segment id}}`: a missing or non-string id renders as empty.
///
/// Percent-encoding leaves no `"`, `<` or `>`, so the output is written
/// unescaped.
fn segment(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let id = h.param(0).and_then(|p| p.value().as_str()).unwrap_or("");
    out.write(&path_segment(id))?;
    Ok(())
}

/// File name of the shared layout template
pub const LAYOUT: &str = "layout.html";

/// Partial name the layout is registered under
const LAYOUT_PARTIAL: &str = "layout";

/// Every page the application renders
pub const PAGES: [&str; 6] = [
    "welcome.html",
    "beer/index.html",
    "beer/show.html",
    "beer/edit.html",
    "brewery/index.html",
    "brewery/show.html",
];

const EMBEDDED: [(&str, &str); 7] = [
    (LAYOUT, include_str!("../../tmpls/layout.html")),
    ("welcome.html", include_str!("../../tmpls/welcome.html")),
    ("beer/index.html", include_str!("../../tmpls/beer/index.html")),
    ("beer/show.html", include_str!("../../tmpls/beer/show.html")),
    ("beer/edit.html", include_str!("../../tmpls/beer/edit.html")),
    ("brewery/index.html", include_str!("../../tmpls/brewery/index.html")),
    ("brewery/show.html", include_str!("../../tmpls/brewery/show.html")),
];

/// Template errors
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse template {name}: {reason}")]
    Parse { name: String, reason: String },

    #[error("Failed to render template {name}: {reason}")]
    Render { name: String, reason: String },

    #[error("Unknown template: {0}")]
    Unknown(String),
}

/// Parsed page templates, keyed by page name
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    /// Build from the templates compiled into the binary
    pub fn embedded() -> Result<Self, TemplateError> {
        let sources = EMBEDDED
            .iter()
            .map(|(name, source)| (name.to_string(), source.to_string()));
        Self::from_sources(sources)
    }

    /// Build from `dir`, which must hold the layout and every page
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let mut sources = Vec::with_capacity(PAGES.len() + 1);
        for name in std::iter::once(LAYOUT).chain(PAGES) {
            let path = dir.join(name);
            let source = fs::read_to_string(&path).map_err(|e| TemplateError::Read {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            sources.push((name.to_string(), source));
        }
        Self::from_sources(sources)
    }

    fn from_sources(
        sources: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_helper(SEGMENT_HELPER, Box::new(segment));

        for (name, source) in sources {
            let result = if name == LAYOUT {
                handlebars.register_partial(LAYOUT_PARTIAL, source)
            } else {
                handlebars.register_template_string(&name, compose(&source))
            };
            result.map_err(|e| TemplateError::Parse {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        }

        if !handlebars.has_template(LAYOUT_PARTIAL) {
            return Err(TemplateError::Unknown(LAYOUT.to_string()));
        }

        Ok(Self { handlebars })
    }

    /// Render page `name` with `data`
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, TemplateError> {
        if !self.has_page(name) {
            return Err(TemplateError::Unknown(name.to_string()));
        }
        self.handlebars
            .render(name, data)
            .map_err(|e| TemplateError::Render {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Whether page `name` is registered
    pub fn has_page(&self, name: &str) -> bool {
        name != LAYOUT_PARTIAL && self.handlebars.has_template(name)
    }

    /// Registered page names, sorted
    pub fn page_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .handlebars
            .get_templates()
            .keys()
            .map(String::as_str)
            .filter(|name| *name != LAYOUT_PARTIAL)
            .collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("pages", &self.page_names())
            .finish()
    }
}

/// Wrap a page body so the layout partial renders it through `{{> page}}`
fn compose(page: &str) -> String {
    let mut source = String::with_capacity(page.len() + 48);
    source.push_str("{{#*inline \"page\"}}");
    source.push_str(page);
    source.push_str("{{/inline}}{{> ");
    source.push_str(LAYOUT_PARTIAL);
    source.push_str("}}");
    source
}
