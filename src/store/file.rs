//! # Filesystem Document Store
//!
//! One JSON file per document under `<root>/<bucket>/`. File names are the
//! form-urlencoded document id, so any id maps to a single flat file; the
//! id itself is kept inside the file alongside the body.
//!
//! Views are in-memory only and rebuilt from disk when the store opens. A
//! file that cannot be read is logged and left out of the views; reading
//! it by key still reports the error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::backend::{DocumentStore, ViewQuery, ViewRow};
use super::errors::{StoreError, StoreResult};
use super::view::ViewIndex;
use crate::observability::Event;

const EXTENSION: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    id: String,
    document: Value,
}

/// Document store persisting each document as a file.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    views: Mutex<ViewIndex>,
}

impl FileStore {
    /// Open (creating if needed) the bucket directory under `root`
    pub fn open(root: impl AsRef<Path>, bucket: &str) -> StoreResult<Self> {
        if bucket.is_empty() || bucket.contains(['/', '\\']) || matches!(bucket, "." | "..") {
            return Err(StoreError::InvalidKey(bucket.to_string()));
        }

        let dir = root.as_ref().join(bucket);
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io(e.to_string()))?;

        let mut views = ViewIndex::standard();
        for entry in fs::read_dir(&dir).map_err(|e| StoreError::Io(e.to_string()))? {
            let path = entry.map_err(|e| StoreError::Io(e.to_string()))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match read_stored(&path) {
                Ok(stored) => views.record_put(&stored.id, &stored.document),
                Err(e) => {
                    warn!(
                        event = Event::DocumentUnreadable.as_str(),
                        path = %path.display(),
                        error = %e,
                        "leaving document out of views"
                    );
                }
            }
        }
        views.refresh();

        Ok(Self {
            dir,
            views: Mutex::new(views),
        })
    }

    /// Directory holding the bucket's documents
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> StoreResult<PathBuf> {
        if id.is_empty() {
            return Err(StoreError::InvalidKey(id.to_string()));
        }
        let name: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
        Ok(self.dir.join(format!("{}.{}", name, EXTENSION)))
    }

    fn views(&self) -> StoreResult<MutexGuard<'_, ViewIndex>> {
        self.views
            .lock()
            .map_err(|_| StoreError::Internal("file store lock poisoned".into()))
    }

    fn write_file(&self, path: &Path, id: &str, document: &Value) -> StoreResult<()> {
        let stored = StoredDocument {
            id: id.to_string(),
            document: document.clone(),
        };
        let bytes = serde_json::to_vec(&stored).map_err(|e| StoreError::Encode {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        // Write then rename so readers never see a partial file
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, path).map_err(|e| StoreError::Io(e.to_string()))
    }
}

fn read_stored(path: &Path) -> StoreResult<StoredDocument> {
    let bytes = fs::read(path).map_err(|e| StoreError::Io(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode {
        id: path.display().to_string(),
        reason: e.to_string(),
    })
}

impl DocumentStore for FileStore {
    fn get(&self, id: &str) -> StoreResult<Value> {
        let path = self.path_for(id)?;
        match fs::read(&path) {
            Ok(bytes) => {
                let stored: StoredDocument =
                    serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode {
                        id: id.to_string(),
                        reason: e.to_string(),
                    })?;
                Ok(stored.document)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(id.to_string())),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    fn insert(&self, id: &str, document: &Value) -> StoreResult<()> {
        let path = self.path_for(id)?;
        // Holding the view lock serializes writers
        let mut views = self.views()?;
        if path.exists() {
            return Err(StoreError::AlreadyExists(id.to_string()));
        }
        self.write_file(&path, id, document)?;
        views.record_put(id, document);
        Ok(())
    }

    fn upsert(&self, id: &str, document: &Value) -> StoreResult<()> {
        let path = self.path_for(id)?;
        let mut views = self.views()?;
        self.write_file(&path, id, document)?;
        views.record_put(id, document);
        Ok(())
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        let path = self.path_for(id)?;
        let mut views = self.views()?;
        fs::remove_file(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(id.to_string())
            } else {
                StoreError::Io(e.to_string())
            }
        })?;
        views.record_remove(id);
        Ok(())
    }

    fn query_view(&self, query: &ViewQuery) -> StoreResult<Vec<ViewRow>> {
        self.views()?.query(query)
    }
}
