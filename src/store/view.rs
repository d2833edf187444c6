//! Materialized view indexes
//!
//! A view maps every document of one `type` to a string key taken from one
//! of its fields. Rows live in a `BTreeSet<(key, id)>` so iteration is
//! ordered by key, then by document id.
//!
//! Writes are not applied to the views immediately: the store records them
//! as pending changes and each query decides, through its [`Freshness`],
//! whether to apply them before reading. Whatever is still pending once a
//! query has read is applied afterwards, so stale reads lag by at most one
//! query. A write that fills the queue to [`MAX_PENDING`] applies it too.

use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;

use serde_json::Value;

use super::backend::{Freshness, ViewQuery, ViewRow};
use super::errors::{StoreError, StoreResult};

/// Definition of a view: documents with `type == doc_type` emit `key_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewDef {
    pub design: &'static str,
    pub view: &'static str,
    pub doc_type: &'static str,
    pub key_field: &'static str,
}

impl ViewDef {
    /// Key emitted by `document`, if it belongs to this view
    pub fn emit(&self, document: &Value) -> Option<String> {
        let doc_type = document.get("type").and_then(Value::as_str)?;
        if doc_type != self.doc_type {
            return None;
        }
        document
            .get(self.key_field)
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Value of the `type` discriminator on beer documents
pub const BEER_TYPE: &str = "beer";

/// Value of the `type` discriminator on brewery documents
pub const BREWERY_TYPE: &str = "brewery";

/// The `by_name` views of the beer-sample bucket.
pub const STANDARD_VIEWS: [ViewDef; 2] = [
    ViewDef {
        design: BEER_TYPE,
        view: "by_name",
        doc_type: BEER_TYPE,
        key_field: "name",
    },
    ViewDef {
        design: BREWERY_TYPE,
        view: "by_name",
        doc_type: BREWERY_TYPE,
        key_field: "name",
    },
];

/// Pending changes at which a write applies the whole queue
pub const MAX_PENDING: usize = 1024;

#[derive(Debug, Clone)]
enum Change {
    Put { id: String, document: Value },
    Remove { id: String },
}

#[derive(Debug)]
struct MaterializedView {
    def: ViewDef,
    rows: BTreeSet<(String, String)>,
    keys_by_id: HashMap<String, String>,
}

impl MaterializedView {
    fn new(def: ViewDef) -> Self {
        Self {
            def,
            rows: BTreeSet::new(),
            keys_by_id: HashMap::new(),
        }
    }

    fn apply(&mut self, change: &Change) {
        let id = match change {
            Change::Put { id, .. } | Change::Remove { id } => id,
        };

        if let Some(old_key) = self.keys_by_id.remove(id) {
            self.rows.remove(&(old_key, id.clone()));
        }

        if let Change::Put { document, .. } = change {
            if let Some(key) = self.def.emit(document) {
                self.rows.insert((key.clone(), id.clone()));
                self.keys_by_id.insert(id.clone(), key);
            }
        }
    }

    fn scan(&self, query: &ViewQuery) -> Vec<ViewRow> {
        let limit = query.limit.unwrap_or(usize::MAX);
        let lower = match &query.range {
            Some(range) => Bound::Included((range.start.clone(), String::new())),
            None => Bound::Unbounded,
        };

        self.rows
            .range((lower, Bound::Unbounded))
            .take_while(|(key, _)| {
                query
                    .range
                    .as_ref()
                    .map_or(true, |range| range.contains(key))
            })
            .take(limit)
            .map(|(key, id)| ViewRow {
                id: id.clone(),
                key: key.clone(),
            })
            .collect()
    }
}

/// The set of views a store maintains.
#[derive(Debug)]
pub struct ViewIndex {
    views: Vec<MaterializedView>,
    pending: Vec<Change>,
}

impl ViewIndex {
    /// Creates an index maintaining the given views
    pub fn new(defs: &[ViewDef]) -> Self {
        Self {
            views: defs.iter().copied().map(MaterializedView::new).collect(),
            pending: Vec::new(),
        }
    }

    /// Creates an index maintaining [`STANDARD_VIEWS`]
    pub fn standard() -> Self {
        Self::new(&STANDARD_VIEWS)
    }

    /// Record that `document` was written under `id`
    pub fn record_put(&mut self, id: &str, document: &Value) {
        self.push(Change::Put {
            id: id.to_string(),
            document: document.clone(),
        });
    }

    /// Record that `id` was removed
    pub fn record_remove(&mut self, id: &str) {
        self.push(Change::Remove { id: id.to_string() });
    }

    fn push(&mut self, change: Change) {
        self.pending.push(change);
        if self.pending.len() >= MAX_PENDING {
            self.refresh();
        }
    }

    /// Apply every pending change to the views
    pub fn refresh(&mut self) {
        for change in self.pending.drain(..) {
            for view in &mut self.views {
                view.apply(&change);
            }
        }
    }

    /// Number of writes not yet reflected in the views
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Run a query, refreshing according to its freshness mode
    pub fn query(&mut self, query: &ViewQuery) -> StoreResult<Vec<ViewRow>> {
        let position = self
            .views
            .iter()
            .position(|v| v.def.design == query.design && v.def.view == query.view)
            .ok_or_else(|| StoreError::ViewNotFound {
                design: query.design.clone(),
                view: query.view.clone(),
            })?;

        if query.freshness == Freshness::UpdateBefore {
            self.refresh();
        }

        let rows = self.views[position].scan(query);

        // Ok and UpdateAfter both catch up once the rows are read
        self.refresh();

        Ok(rows)
    }
}
