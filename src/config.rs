//! Configuration for the question-answering pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{DocChatError, Result};
use crate::store::VectorBackend;

/// Configuration parameters for a [`DocChatPipeline`](crate::DocChatPipeline).
///
/// Defaults match the constants of the reference deployment: MiniLM
/// embeddings, 1000-character chunks with 100-character overlap, the three
/// nearest chunks as context, and a deterministic (temperature 0) Gemini
/// Flash generator conditioned on the last three conversation turns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocChatConfig {
    /// Name of the sentence-embedding model.
    pub embed_model: String,
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of chunks to retrieve as context for each question.
    pub top_k: usize,
    /// Name of the hosted LLM used to compose answers.
    pub llm_model: String,
    /// Sampling temperature for answer generation.
    pub temperature: f32,
    /// Number of most-recent conversation turns included in the prompt.
    pub history_window: usize,
    /// Which vector store backend to persist embeddings in.
    pub backend: VectorBackend,
}

impl Default for DocChatConfig {
    fn default() -> Self {
        Self {
            embed_model: "all-MiniLM-L6-v2".to_string(),
            chunk_size: 1000,
            chunk_overlap: 100,
            top_k: 3,
            llm_model: "gemini-1.5-flash".to_string(),
            temperature: 0.0,
            history_window: 3,
            backend: VectorBackend::Sqlite,
        }
    }
}

impl DocChatConfig {
    /// Create a new builder for constructing a [`DocChatConfig`].
    pub fn builder() -> DocChatConfigBuilder {
        DocChatConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`DocChatConfig`].
#[derive(Debug, Clone, Default)]
pub struct DocChatConfigBuilder {
    config: DocChatConfig,
}

impl DocChatConfigBuilder {
    /// Set the sentence-embedding model name.
    pub fn embed_model(mut self, model: impl Into<String>) -> Self {
        self.config.embed_model = model.into();
        self
    }

    /// Set the target chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of chunks retrieved as context per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the hosted LLM model name.
    pub fn llm_model(mut self, model: impl Into<String>) -> Self {
        self.config.llm_model = model.into();
        self
    }

    /// Set the sampling temperature for answer generation.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the number of most-recent turns included in the prompt.
    pub fn history_window(mut self, window: usize) -> Self {
        self.config.history_window = window;
        self
    }

    /// Set the vector store backend.
    pub fn backend(mut self, backend: VectorBackend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Build the [`DocChatConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`DocChatError::ConfigError`] if `chunk_overlap >= chunk_size`.
    pub fn build(self) -> Result<DocChatConfig> {
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(DocChatError::ConfigError(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        Ok(self.config)
    }
}
