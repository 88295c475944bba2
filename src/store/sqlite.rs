//! On-disk vector index backed by SQLite.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::document::{IndexEntry, SearchResult};
use crate::error::{DocChatError, Result};
use crate::store::{VectorStore, check_dimensions, rank};

/// A [`VectorStore`] persisting entries as rows in a SQLite database file.
///
/// [`index`](VectorStore::index) **appends**: a second call on the same
/// location grows the stored contents rather than replacing them.
/// Embeddings are stored as little-endian `f32` blobs. Search loads all
/// rows in insertion order and scores them in memory; at single-document
/// scale there is no need for an approximate index.
///
/// # Example
///
/// ```rust,ignore
/// use docchat::{SqliteVectorStore, VectorStore};
///
/// let store = SqliteVectorStore::open("sqlite_index")?;
/// store.index(entries).await?;
/// let results = store.search(&query_embedding, 3).await?;
/// ```
pub struct SqliteVectorStore {
    db_path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteVectorStore {
    /// The conventional directory name for this backend.
    pub const DEFAULT_DIR: &'static str = "sqlite_index";

    const DB_FILE: &'static str = "index.db";

    /// Open (or create) an index rooted at `dir`.
    ///
    /// Rows written by a previous process are visible immediately; a fresh
    /// directory yields an empty store.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| Self::store_err(format!(
            "failed to create {}: {e}",
            dir.display()
        )))?;

        let db_path = dir.join(Self::DB_FILE);
        let conn = Connection::open(&db_path)
            .map_err(|e| Self::store_err(format!("failed to open {}: {e}", db_path.display())))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                embedding BLOB NOT NULL,
                dimensions INTEGER NOT NULL
            )",
            [],
        )
        .map_err(|e| Self::store_err(format!("failed to create schema: {e}")))?;

        debug!(path = %db_path.display(), "opened sqlite index");
        Ok(Self { db_path, conn: Mutex::new(conn) })
    }

    fn store_err(message: String) -> DocChatError {
        DocChatError::VectorStoreError { backend: "sqlite".to_string(), message }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Self::store_err("connection mutex poisoned".to_string()))
    }

    fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(embedding.len() * 4);
        for value in embedding {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    fn decode_embedding(bytes: &[u8]) -> Result<Vec<f32>> {
        if bytes.len() % 4 != 0 {
            return Err(Self::store_err(format!(
                "corrupt embedding blob of {} bytes",
                bytes.len()
            )));
        }
        Ok(bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect())
    }

    fn stored_dimensions(conn: &Connection) -> Result<Option<usize>> {
        use rusqlite::OptionalExtension;
        conn.query_row("SELECT dimensions FROM entries LIMIT 1", [], |row| {
            row.get::<_, i64>(0)
        })
        .optional()
        .map(|dims| dims.map(|d| d as usize))
        .map_err(|e| Self::store_err(format!("failed to read dimensions: {e}")))
    }

    fn all_entries(conn: &Connection) -> Result<Vec<IndexEntry>> {
        let mut stmt = conn
            .prepare("SELECT text, embedding FROM entries ORDER BY id")
            .map_err(|e| Self::store_err(format!("failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
            })
            .map_err(|e| Self::store_err(format!("failed to query entries: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            let (text, blob) =
                row.map_err(|e| Self::store_err(format!("failed to read row: {e}")))?;
            entries.push(IndexEntry { text, embedding: Self::decode_embedding(&blob)? });
        }
        Ok(entries)
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn index(&self, entries: Vec<IndexEntry>) -> Result<()> {
        let mut conn = self.conn()?;
        let existing = Self::stored_dimensions(&conn)?;
        check_dimensions(&entries, existing, "sqlite")?;

        let tx = conn
            .transaction()
            .map_err(|e| Self::store_err(format!("failed to begin transaction: {e}")))?;
        for entry in &entries {
            tx.execute(
                "INSERT INTO entries (text, embedding, dimensions) VALUES (?1, ?2, ?3)",
                rusqlite::params![
                    entry.text,
                    Self::encode_embedding(&entry.embedding),
                    entry.embedding.len() as i64
                ],
            )
            .map_err(|e| Self::store_err(format!("failed to insert entry: {e}")))?;
        }
        tx.commit().map_err(|e| Self::store_err(format!("failed to commit: {e}")))?;

        info!(count = entries.len(), path = %self.db_path.display(), "sqlite index appended");
        Ok(())
    }

    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        let conn = self.conn()?;
        let entries = Self::all_entries(&conn)?;
        if entries.is_empty() {
            return Err(DocChatError::NotIndexed);
        }
        Ok(rank(&entries, query, k))
    }

    async fn len(&self) -> Result<usize> {
        let conn = self.conn()?;
        conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(|e| Self::store_err(format!("failed to count entries: {e}")))
    }
}
