//! Flat similarity index persisted as a JSON snapshot.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::document::{IndexEntry, SearchResult};
use crate::error::{DocChatError, Result};
use crate::store::{VectorStore, check_dimensions, rank};

/// A [`VectorStore`] holding all entries in memory and persisting them as
/// one JSON snapshot file.
///
/// [`index`](VectorStore::index) **replaces** any previously stored
/// contents, both in memory and on disk. Searching scans every entry,
/// which is fine at single-document scale.
///
/// # Example
///
/// ```rust,ignore
/// use docchat::{FlatIndexStore, VectorStore};
///
/// let store = FlatIndexStore::open("flat_index")?;
/// store.index(entries).await?;
/// let results = store.search(&query_embedding, 3).await?;
/// ```
#[derive(Debug)]
pub struct FlatIndexStore {
    dir: PathBuf,
    entries: RwLock<Vec<IndexEntry>>,
}

impl FlatIndexStore {
    /// The conventional directory name for this backend.
    pub const DEFAULT_DIR: &'static str = "flat_index";

    const SNAPSHOT_FILE: &'static str = "index.json";

    /// Open a flat index rooted at `dir`, reloading a previously written
    /// snapshot if one exists. A missing directory yields an empty store.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let snapshot = dir.join(Self::SNAPSHOT_FILE);

        let entries = if snapshot.exists() {
            let raw = fs::read(&snapshot).map_err(|e| Self::store_err(&snapshot, e))?;
            let entries: Vec<IndexEntry> =
                serde_json::from_slice(&raw).map_err(|e| DocChatError::VectorStoreError {
                    backend: "flat".to_string(),
                    message: format!("corrupt snapshot at {}: {e}", snapshot.display()),
                })?;
            debug!(count = entries.len(), path = %snapshot.display(), "loaded flat index snapshot");
            entries
        } else {
            Vec::new()
        };

        Ok(Self { dir, entries: RwLock::new(entries) })
    }

    fn store_err(path: &std::path::Path, e: std::io::Error) -> DocChatError {
        DocChatError::VectorStoreError {
            backend: "flat".to_string(),
            message: format!("{}: {e}", path.display()),
        }
    }

    fn persist(&self, entries: &[IndexEntry]) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::store_err(&self.dir, e))?;
        let snapshot = self.dir.join(Self::SNAPSHOT_FILE);
        let raw = serde_json::to_vec(entries).map_err(|e| DocChatError::VectorStoreError {
            backend: "flat".to_string(),
            message: format!("failed to serialize snapshot: {e}"),
        })?;
        fs::write(&snapshot, raw).map_err(|e| Self::store_err(&snapshot, e))
    }
}

#[async_trait]
impl VectorStore for FlatIndexStore {
    fn backend_name(&self) -> &'static str {
        "flat"
    }

    async fn index(&self, entries: Vec<IndexEntry>) -> Result<()> {
        check_dimensions(&entries, None, "flat")?;

        let mut stored = self.entries.write().await;
        self.persist(&entries)?;
        let count = entries.len();
        *stored = entries;

        info!(count, dir = %self.dir.display(), "flat index replaced");
        Ok(())
    }

    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        let entries = self.entries.read().await;
        if entries.is_empty() {
            return Err(DocChatError::NotIndexed);
        }
        Ok(rank(&entries, query, k))
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }
}
