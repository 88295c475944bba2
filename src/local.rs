//! Local sentence-embedding provider backed by `fastembed`.
//!
//! This module is only available when the `local-embeddings` feature is
//! enabled. Models are downloaded on first use and cached locally; after
//! that, embedding requires no network access.

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::debug;

use crate::embedding::EmbeddingProvider;
use crate::error::{DocChatError, Result};

/// An [`EmbeddingProvider`] running a pretrained sentence-embedding model
/// in-process via [fastembed](https://docs.rs/fastembed).
///
/// The model is selected by name; see [`LocalEmbeddingProvider::new`] for
/// the supported names. Inference is deterministic for a fixed model
/// version, so embedding the same string twice yields identical vectors.
///
/// # Example
///
/// ```rust,ignore
/// use docchat::LocalEmbeddingProvider;
///
/// let provider = LocalEmbeddingProvider::new("all-MiniLM-L6-v2")?;
/// let embedding = provider.embed("hello world").await?;
/// assert_eq!(embedding.len(), 384);
/// ```
pub struct LocalEmbeddingProvider {
    model: TextEmbedding,
    model_name: String,
    dimensions: usize,
}

impl LocalEmbeddingProvider {
    /// Create a provider for the named model.
    ///
    /// Supported names: `all-MiniLM-L6-v2` (384 dimensions) and
    /// `bge-small-en-v1.5` (384 dimensions).
    ///
    /// # Errors
    ///
    /// Returns [`DocChatError::ConfigError`] for an unknown model name and
    /// [`DocChatError::EmbeddingError`] if the model fails to initialize.
    pub fn new(model_name: &str) -> Result<Self> {
        let (model, dimensions) = match model_name {
            "all-MiniLM-L6-v2" => (EmbeddingModel::AllMiniLML6V2, 384),
            "bge-small-en-v1.5" => (EmbeddingModel::BGESmallENV15, 384),
            other => {
                return Err(DocChatError::ConfigError(format!(
                    "unknown embedding model '{other}'"
                )));
            }
        };

        let model = TextEmbedding::try_new(
            InitOptions::new(model).with_show_download_progress(false),
        )
        .map_err(|e| DocChatError::EmbeddingError {
            provider: "fastembed".into(),
            message: format!("failed to initialize model '{model_name}': {e}"),
        })?;

        Ok(Self { model, model_name: model_name.to_string(), dimensions })
    }

    /// The name of the loaded model.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl EmbeddingProvider for LocalEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| DocChatError::EmbeddingError {
            provider: "fastembed".into(),
            message: "model returned no embedding".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(model = %self.model_name, batch_size = texts.len(), "embedding batch");

        self.model.embed(texts.to_vec(), None).map_err(|e| DocChatError::EmbeddingError {
            provider: "fastembed".into(),
            message: format!("inference failed: {e}"),
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
