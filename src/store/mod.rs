//! Vector store trait and file-backed implementations.
//!
//! Two interchangeable backends implement [`VectorStore`]:
//!
//! - [`FlatIndexStore`] — a flat similarity index persisted as one JSON
//!   snapshot; re-indexing **replaces** the stored contents.
//! - [`SqliteVectorStore`] — an on-disk SQLite index; re-indexing
//!   **appends** to the stored contents.
//!
//! The append-versus-replace difference on a second `index` call is the
//! one place the backends deliberately diverge; callers must not assume
//! either behavior across backends. Both persist under one directory per
//! backend and reload that state on [`open`](FlatIndexStore::open), so an
//! index survives process restart without re-embedding. Concurrent access
//! to one location from multiple processes is unsupported.

mod flat;
mod sqlite;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use flat::FlatIndexStore;
pub use sqlite::SqliteVectorStore;

use crate::document::{IndexEntry, SearchResult};
use crate::error::{DocChatError, Result};

/// A storage backend for chunk embeddings with similarity search.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// A short name identifying the backend, used in error messages.
    fn backend_name(&self) -> &'static str;

    /// Persist entries to this store's location.
    ///
    /// Whether pre-existing entries are replaced or kept is
    /// backend-defined; see the module docs.
    async fn index(&self, entries: Vec<IndexEntry>) -> Result<()>;

    /// Return the `k` stored entries nearest to `query` by cosine
    /// similarity, highest first, ties broken by insertion order.
    ///
    /// `k` larger than the store returns all entries; `k == 0` returns
    /// an empty `Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`DocChatError::NotIndexed`] if the store holds no entries.
    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>>;

    /// Number of entries currently stored.
    async fn len(&self) -> Result<usize>;
}

/// Selects which [`VectorStore`] implementation a pipeline uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VectorBackend {
    /// [`FlatIndexStore`]: JSON snapshot, `index` replaces.
    Flat,
    /// [`SqliteVectorStore`]: SQLite file, `index` appends.
    Sqlite,
}

impl VectorBackend {
    /// The conventional on-disk directory for this backend.
    pub fn default_dir(&self) -> &'static str {
        match self {
            VectorBackend::Flat => FlatIndexStore::DEFAULT_DIR,
            VectorBackend::Sqlite => SqliteVectorStore::DEFAULT_DIR,
        }
    }
}

/// Open (or create) a store of the given backend at `dir`.
pub fn open_store(backend: VectorBackend, dir: impl AsRef<Path>) -> Result<Arc<dyn VectorStore>> {
    match backend {
        VectorBackend::Flat => Ok(Arc::new(FlatIndexStore::open(dir.as_ref())?)),
        VectorBackend::Sqlite => Ok(Arc::new(SqliteVectorStore::open(dir.as_ref())?)),
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Score `entries` against `query` and keep the top `k`.
///
/// The sort is stable, so equal scores keep insertion order.
pub(crate) fn rank(entries: &[IndexEntry], query: &[f32], k: usize) -> Vec<SearchResult> {
    let mut scored: Vec<SearchResult> = entries
        .iter()
        .map(|entry| SearchResult {
            text: entry.text.clone(),
            score: cosine_similarity(&entry.embedding, query),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(k);
    scored
}

/// Verify that a batch of entries shares one dimensionality, optionally
/// matching the dimensionality already present in the store.
pub(crate) fn check_dimensions(
    entries: &[IndexEntry],
    existing: Option<usize>,
    backend: &'static str,
) -> Result<()> {
    let mut expected = existing;
    for entry in entries {
        match expected {
            None => expected = Some(entry.embedding.len()),
            Some(dims) if entry.embedding.len() != dims => {
                return Err(DocChatError::VectorStoreError {
                    backend: backend.to_string(),
                    message: format!(
                        "dimension mismatch: expected {dims}, got {}",
                        entry.embedding.len()
                    ),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}
