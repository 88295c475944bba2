//! Tests for both vector store backends: search ordering, persistence,
//! and the backend-defined replace-versus-append semantics.

use std::sync::Arc;

use docchat::{
    DocChatError, FlatIndexStore, IndexEntry, SqliteVectorStore, VectorBackend, VectorStore,
    open_store,
};
use proptest::prelude::*;
use tempfile::TempDir;

fn entry(text: &str, embedding: Vec<f32>) -> IndexEntry {
    IndexEntry { text: text.to_string(), embedding }
}

fn both_backends() -> Vec<(TempDir, Arc<dyn VectorStore>)> {
    [VectorBackend::Flat, VectorBackend::Sqlite]
        .into_iter()
        .map(|backend| {
            let dir = TempDir::new().unwrap();
            let store = open_store(backend, dir.path()).unwrap();
            (dir, store)
        })
        .collect()
}

#[tokio::test]
async fn search_on_empty_store_is_not_indexed() {
    for (_dir, store) in both_backends() {
        let err = store.search(&[1.0, 0.0], 3).await.unwrap_err();
        assert!(matches!(err, DocChatError::NotIndexed), "{}", store.backend_name());
    }
}

#[tokio::test]
async fn search_orders_by_descending_similarity() {
    for (_dir, store) in both_backends() {
        store
            .index(vec![
                entry("orthogonal", vec![0.0, 1.0]),
                entry("близко", vec![0.9, 0.1]),
                entry("exact", vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 3).await.unwrap();
        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["exact", "близко", "orthogonal"]);
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
    }
}

#[tokio::test]
async fn k_zero_returns_empty_and_large_k_returns_all() {
    for (_dir, store) in both_backends() {
        store
            .index(vec![entry("a", vec![1.0, 0.0]), entry("b", vec![0.0, 1.0])])
            .await
            .unwrap();

        assert!(store.search(&[1.0, 0.0], 0).await.unwrap().is_empty());
        assert_eq!(store.search(&[1.0, 0.0], 10).await.unwrap().len(), 2);
    }
}

#[tokio::test]
async fn ties_broken_by_insertion_order() {
    for (_dir, store) in both_backends() {
        store
            .index(vec![
                entry("first", vec![1.0, 0.0]),
                entry("second", vec![1.0, 0.0]),
                entry("third", vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 3).await.unwrap();
        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"], "{}", store.backend_name());
    }
}

#[tokio::test]
async fn mixed_dimensions_are_rejected() {
    for (_dir, store) in both_backends() {
        let err = store
            .index(vec![entry("a", vec![1.0, 0.0]), entry("b", vec![1.0, 0.0, 0.0])])
            .await
            .unwrap_err();
        assert!(matches!(err, DocChatError::VectorStoreError { .. }));
    }
}

#[tokio::test]
async fn persisted_index_survives_reopen() {
    for backend in [VectorBackend::Flat, VectorBackend::Sqlite] {
        let dir = TempDir::new().unwrap();
        {
            let store = open_store(backend, dir.path()).unwrap();
            store
                .index(vec![entry("kept", vec![1.0, 0.0]), entry("other", vec![0.0, 1.0])])
                .await
                .unwrap();
        }

        // A new handle on the same location sees the persisted entries
        // without re-embedding.
        let reopened = open_store(backend, dir.path()).unwrap();
        assert_eq!(reopened.len().await.unwrap(), 2);
        let results = reopened.search(&[1.0, 0.0], 1).await.unwrap();
        assert_eq!(results[0].text, "kept");
    }
}

#[tokio::test]
async fn flat_backend_replaces_on_reindex() {
    let dir = TempDir::new().unwrap();
    let store = FlatIndexStore::open(dir.path()).unwrap();

    store.index(vec![entry("old", vec![1.0, 0.0])]).await.unwrap();
    store.index(vec![entry("new", vec![0.0, 1.0])]).await.unwrap();

    assert_eq!(store.len().await.unwrap(), 1);
    let results = store.search(&[0.0, 1.0], 5).await.unwrap();
    assert_eq!(results[0].text, "new");
}

#[tokio::test]
async fn sqlite_backend_appends_on_reindex() {
    let dir = TempDir::new().unwrap();
    let store = SqliteVectorStore::open(dir.path()).unwrap();

    store.index(vec![entry("old", vec![1.0, 0.0])]).await.unwrap();
    store.index(vec![entry("new", vec![0.0, 1.0])]).await.unwrap();

    assert_eq!(store.len().await.unwrap(), 2);
}

#[tokio::test]
async fn sqlite_append_rejects_dimension_change() {
    let dir = TempDir::new().unwrap();
    let store = SqliteVectorStore::open(dir.path()).unwrap();

    store.index(vec![entry("a", vec![1.0, 0.0])]).await.unwrap();
    let err = store.index(vec![entry("b", vec![1.0, 0.0, 0.0])]).await.unwrap_err();
    assert!(matches!(err, DocChatError::VectorStoreError { .. }));
}

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map("non-zero embedding", |mut v| {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm < 1e-8 {
            return None;
        }
        for val in &mut v {
            *val /= norm;
        }
        Some(v)
    })
}

mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For any stored entries and query, search returns results
        /// ordered by descending cosine similarity, bounded by k and by
        /// the store size.
        #[test]
        fn results_ordered_descending_and_bounded_by_k(
            embeddings in proptest::collection::vec(arb_normalized_embedding(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                for (_dir, store) in both_backends() {
                    let entries: Vec<IndexEntry> = embeddings
                        .iter()
                        .enumerate()
                        .map(|(i, e)| entry(&format!("chunk {i}"), e.clone()))
                        .collect();
                    let count = entries.len();

                    store.index(entries).await.unwrap();
                    let results = store.search(&query, k).await.unwrap();

                    assert!(results.len() <= k);
                    assert!(results.len() <= count);
                    for window in results.windows(2) {
                        assert!(
                            window[0].score >= window[1].score,
                            "results not in descending order: {} < {}",
                            window[0].score,
                            window[1].score,
                        );
                    }
                }
            });
        }
    }
}
