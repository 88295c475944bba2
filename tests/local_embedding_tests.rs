//! Tests for the fastembed-backed provider.
//!
//! These require a model download on first run, so they are ignored by
//! default. Run with `cargo test -- --ignored` when network is available.

#![cfg(feature = "local-embeddings")]

use docchat::{DocChatError, EmbeddingProvider, LocalEmbeddingProvider};

#[test]
fn unknown_model_name_is_rejected() {
    let err = LocalEmbeddingProvider::new("definitely-not-a-model").unwrap_err();
    assert!(matches!(err, DocChatError::ConfigError(_)));
}

#[tokio::test]
#[ignore = "requires model download"]
async fn embedding_is_deterministic() {
    let provider = LocalEmbeddingProvider::new("all-MiniLM-L6-v2").unwrap();

    let first = provider.embed("The sky is blue.").await.unwrap();
    let second = provider.embed("The sky is blue.").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
#[ignore = "requires model download"]
async fn dimensions_match_the_model() {
    let provider = LocalEmbeddingProvider::new("all-MiniLM-L6-v2").unwrap();
    assert_eq!(provider.dimensions(), 384);

    let embedding = provider.embed("hello world").await.unwrap();
    assert_eq!(embedding.len(), 384);
}

#[tokio::test]
#[ignore = "requires model download"]
async fn batch_preserves_input_order() {
    let provider = LocalEmbeddingProvider::new("all-MiniLM-L6-v2").unwrap();

    let batch = provider.embed_batch(&["first text", "second text"]).await.unwrap();
    let first = provider.embed("first text").await.unwrap();
    let second = provider.embed("second text").await.unwrap();

    assert_eq!(batch[0], first);
    assert_eq!(batch[1], second);
}
