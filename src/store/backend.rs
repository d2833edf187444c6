//! # Document Store Trait
//!
//! Key-value access to JSON documents plus range queries over the
//! secondary (view) indexes the store maintains.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::StoreResult;

/// How up to date a view must be before a query reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Apply pending writes to the index, then query
    UpdateBefore,
    /// Query the index as it is; may miss writes made since the last query.
    /// The index still catches up afterwards, so a later read sees them.
    #[default]
    Ok,
    /// Query the index as it is, then apply pending writes
    UpdateAfter,
}

impl Freshness {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::UpdateBefore => "update_before",
            Freshness::Ok => "ok",
            Freshness::UpdateAfter => "update_after",
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key range over a view, start inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start: String,
    pub end: String,
    pub inclusive_end: bool,
}

impl KeyRange {
    /// Whether `key` falls inside the range
    pub fn contains(&self, key: &str) -> bool {
        if key < self.start.as_str() {
            return false;
        }
        if self.inclusive_end {
            key <= self.end.as_str()
        } else {
            key < self.end.as_str()
        }
    }
}

/// A query against one view of one design document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    pub design: String,
    pub view: String,
    pub limit: Option<usize>,
    pub freshness: Freshness,
    pub range: Option<KeyRange>,
}

impl ViewQuery {
    /// Create an unbounded query over `design/view`
    pub fn new(design: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            design: design.into(),
            view: view.into(),
            limit: None,
            freshness: Freshness::default(),
            range: None,
        }
    }

    /// Cap the number of rows returned
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the freshness mode
    pub fn freshness(mut self, freshness: Freshness) -> Self {
        self.freshness = freshness;
        self
    }

    /// Restrict rows to keys in `[start, end)` or `[start, end]`
    pub fn range(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
        inclusive_end: bool,
    ) -> Self {
        self.range = Some(KeyRange {
            start: start.into(),
            end: end.into(),
            inclusive_end,
        });
        self
    }
}

/// A single view row: the emitting document's id and the emitted key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRow {
    pub id: String,
    pub key: String,
}

/// Document store backend
pub trait DocumentStore: Send + Sync + fmt::Debug {
    /// Fetch the document stored under `id`
    fn get(&self, id: &str) -> StoreResult<Value>;

    /// Store a document under a new key; fails if the key exists
    fn insert(&self, id: &str, document: &Value) -> StoreResult<()>;

    /// Store a document, replacing any existing one
    fn upsert(&self, id: &str, document: &Value) -> StoreResult<()>;

    /// Remove the document stored under `id`
    fn remove(&self, id: &str) -> StoreResult<()>;

    /// Run a view query, rows ordered by key then id
    fn query_view(&self, query: &ViewQuery) -> StoreResult<Vec<ViewRow>>;
}
