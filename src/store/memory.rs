//! # In-Memory Document Store

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use super::backend::{DocumentStore, ViewQuery, ViewRow};
use super::errors::{StoreError, StoreResult};
use super::view::ViewIndex;

#[derive(Debug)]
struct MemoryState {
    documents: HashMap<String, Value>,
    views: ViewIndex,
}

/// Document store holding every document in process memory.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store maintaining the standard views
    pub fn new() -> Self {
        Self::with_views(ViewIndex::standard())
    }

    /// Create an empty store maintaining the given views
    pub fn with_views(views: ViewIndex) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                documents: HashMap::new(),
                views,
            }),
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.read().map(|s| s.documents.len()).unwrap_or(0)
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| StoreError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| StoreError::Internal("memory store lock poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check_key(id: &str) -> StoreResult<()> {
    if id.is_empty() {
        return Err(StoreError::InvalidKey(id.to_string()));
    }
    Ok(())
}

impl DocumentStore for MemoryStore {
    fn get(&self, id: &str) -> StoreResult<Value> {
        self.read()?
            .documents
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn insert(&self, id: &str, document: &Value) -> StoreResult<()> {
        check_key(id)?;
        let mut state = self.write()?;
        if state.documents.contains_key(id) {
            return Err(StoreError::AlreadyExists(id.to_string()));
        }
        state.documents.insert(id.to_string(), document.clone());
        state.views.record_put(id, document);
        Ok(())
    }

    fn upsert(&self, id: &str, document: &Value) -> StoreResult<()> {
        check_key(id)?;
        let mut state = self.write()?;
        state.documents.insert(id.to_string(), document.clone());
        state.views.record_put(id, document);
        Ok(())
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.documents.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        state.views.record_remove(id);
        Ok(())
    }

    fn query_view(&self, query: &ViewQuery) -> StoreResult<Vec<ViewRow>> {
        self.write()?.views.query(query)
    }
}
