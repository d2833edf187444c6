//! # Document Store
//!
//! JSON documents addressed by string keys within one bucket, plus the
//! `by_name` view indexes the catalog queries.
//!
//! # Endpoints
//!
//! - `mem://` - [`MemoryStore`], nothing survives a restart
//! - `file://<dir>` - [`FileStore`], one file per document under `<dir>/<bucket>`

mod backend;
mod errors;
mod file;
mod memory;
mod view;

use std::sync::Arc;

pub use backend::{DocumentStore, Freshness, KeyRange, ViewQuery, ViewRow};
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use view::{ViewDef, ViewIndex, BEER_TYPE, BREWERY_TYPE, MAX_PENDING, STANDARD_VIEWS};

/// Open the store named by `endpoint`, scoped to `bucket`.
pub fn open(endpoint: &str, bucket: &str) -> StoreResult<Arc<dyn DocumentStore>> {
    if endpoint.starts_with("mem://") {
        return Ok(Arc::new(MemoryStore::new()));
    }

    if let Some(dir) = endpoint.strip_prefix("file://") {
        if dir.is_empty() {
            return Err(StoreError::UnsupportedEndpoint(endpoint.to_string()));
        }
        return Ok(Arc::new(FileStore::open(dir, bucket)?));
    }

    Err(StoreError::UnsupportedEndpoint(endpoint.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_memory() {
        let store = open("mem://", "beer-sample").unwrap();
        store.upsert("k", &json!({})).unwrap();
        assert!(store.get("k").is_ok());
    }

    #[test]
    fn test_open_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let endpoint = format!("file://{}", temp.path().display());
        let store = open(&endpoint, "beer-sample").unwrap();
        store.upsert("k", &json!({})).unwrap();
        assert!(temp.path().join("beer-sample").join("k.json").exists());
    }

    #[test]
    fn test_open_unsupported() {
        assert!(matches!(
            open("couchbase://127.0.0.1", "beer-sample"),
            Err(StoreError::UnsupportedEndpoint(_))
        ));
        assert!(matches!(
            open("file://", "beer-sample"),
            Err(StoreError::UnsupportedEndpoint(_))
        ));
    }
}
