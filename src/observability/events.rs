//! Observable events for beersample
//!
//! Every log line the application emits carries one of these names in its
//! `event` field, so operators can filter on a stable vocabulary.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Document store opened
    StoreOpened,
    /// Page templates parsed
    TemplatesLoaded,
    /// Listener bound, about to serve
    ServerStarting,
    /// Documents imported from a file
    ImportComplete,
    /// A stored document file could not be read while opening the store
    DocumentUnreadable,

    // Catalog reads
    /// A listing row was left out because its document could not be read
    RowSkipped,
    /// A view query failed
    ViewQueryFailed,
    /// A key lookup failed
    GetFailed,

    // Catalog writes
    /// An insert or upsert failed
    WriteFailed,
    /// A remove failed
    DeleteFailed,

    // Presentation
    /// A page template failed to render
    RenderFailed,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::TemplatesLoaded => "TEMPLATES_LOADED",
            Event::ServerStarting => "SERVER_STARTING",
            Event::ImportComplete => "IMPORT_COMPLETE",
            Event::DocumentUnreadable => "DOCUMENT_UNREADABLE",
            Event::RowSkipped => "ROW_SKIPPED",
            Event::ViewQueryFailed => "VIEW_QUERY_FAILED",
            Event::GetFailed => "GET_FAILED",
            Event::WriteFailed => "WRITE_FAILED",
            Event::DeleteFailed => "DELETE_FAILED",
            Event::RenderFailed => "RENDER_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
