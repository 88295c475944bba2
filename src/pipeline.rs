//! Question-answering pipeline orchestrator.
//!
//! The [`DocChatPipeline`] coordinates the full upload-and-ask workflow by
//! composing an [`EmbeddingProvider`], a [`VectorStore`], a [`Chunker`],
//! and an [`AnswerGenerator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docchat::{DocChatConfig, DocChatPipeline, GeminiGenerator, LocalEmbeddingProvider, store};
//!
//! let config = DocChatConfig::default();
//! let pipeline = DocChatPipeline::builder()
//!     .config(config.clone())
//!     .embedder(Arc::new(LocalEmbeddingProvider::new(&config.embed_model)?))
//!     .store(store::open_store(config.backend, config.backend.default_dir())?)
//!     .generator(Arc::new(
//!         GeminiGenerator::from_env()?
//!             .with_model(&config.llm_model)
//!             .with_temperature(config.temperature),
//!     ))
//!     .build()?;
//!
//! pipeline.index_document(&pdf_bytes).await?;
//! let answer = pipeline.answer_question("What color is the sky?", &history).await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::{CharacterChunker, Chunker};
use crate::config::DocChatConfig;
use crate::document::{ConversationTurn, IndexEntry, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{DocChatError, Result};
use crate::extract;
use crate::generation::AnswerGenerator;
use crate::prompt::PromptBuilder;
use crate::store::VectorStore;

/// The pipeline orchestrator.
///
/// Indexing runs extract → chunk → embed → store; answering runs
/// embed → search → assemble prompt → generate. All steps are sequential,
/// one request per call, with no overlap and no cancellation.
///
/// The store handle is held for the pipeline's lifetime rather than
/// reopened per question; within one process that is equivalent to
/// reloading, since every `index` call goes through the same handle.
/// Construct one via [`DocChatPipeline::builder()`].
pub struct DocChatPipeline {
    config: DocChatConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
    generator: Arc<dyn AnswerGenerator>,
    prompt_builder: PromptBuilder,
}

impl DocChatPipeline {
    /// Create a new [`DocChatPipelineBuilder`].
    pub fn builder() -> DocChatPipelineBuilder {
        DocChatPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &DocChatConfig {
        &self.config
    }

    /// Return a reference to the vector store.
    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Index an uploaded PDF: extract text, then [`index_text`](Self::index_text).
    ///
    /// Returns the number of chunks indexed.
    ///
    /// # Errors
    ///
    /// Returns [`DocChatError::ExtractionError`] for an unreadable or
    /// empty PDF, or [`DocChatError::PipelineError`] if embedding or
    /// storage fails.
    pub async fn index_document(&self, pdf_bytes: &[u8]) -> Result<usize> {
        let text = extract::pdf_text(pdf_bytes)?;
        self.index_text(&text).await
    }

    /// Index already-extracted text: chunk → embed → store.
    ///
    /// Whether this replaces or extends previously indexed content is
    /// backend-defined; see the [`store`](crate::store) module docs.
    pub async fn index_text(&self, text: &str) -> Result<usize> {
        let chunks = self.chunker.chunk(text);
        if chunks.is_empty() {
            info!(chunk_count = 0, "indexed document (empty)");
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await.map_err(|e| {
            error!(error = %e, "embedding failed during indexing");
            DocChatError::PipelineError(format!("embedding failed during indexing: {e}"))
        })?;

        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { text: chunk.text, embedding })
            .collect();

        let count = entries.len();
        self.store.index(entries).await.map_err(|e| {
            error!(error = %e, "store write failed during indexing");
            DocChatError::PipelineError(format!("store write failed during indexing: {e}"))
        })?;

        info!(chunk_count = count, backend = self.store.backend_name(), "indexed document");
        Ok(count)
    }

    /// Retrieve the `top_k` chunks most similar to `question`.
    ///
    /// # Errors
    ///
    /// Returns [`DocChatError::NotIndexed`] if no document has been
    /// indexed yet.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(question).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            DocChatError::PipelineError(format!("query embedding failed: {e}"))
        })?;

        self.store.search(&query_embedding, self.config.top_k).await
    }

    /// Answer a question against the indexed document, optionally
    /// conditioned on recent conversation turns.
    ///
    /// The turns are the caller's append-only history; only the most
    /// recent `history_window` of them end up in the prompt.
    ///
    /// # Errors
    ///
    /// Returns [`DocChatError::NotIndexed`] if no document has been
    /// indexed yet, or [`DocChatError::GenerationError`] if the LLM call
    /// fails. Failures are surfaced typed, never folded into answer text.
    pub async fn answer_question(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<String> {
        if self.store.len().await? == 0 {
            return Err(DocChatError::NotIndexed);
        }

        let results = self.retrieve(question).await?;
        let context: Vec<String> = results.into_iter().map(|r| r.text).collect();

        let prompt = self.prompt_builder.build(&context, history, question);
        let answer = self.generator.generate(&prompt).await?;

        info!(
            context_chunks = context.len(),
            history_turns = history.len(),
            answer_len = answer.len(),
            "answered question"
        );
        Ok(answer)
    }
}

/// Builder for constructing a [`DocChatPipeline`].
///
/// `config`, `embedder`, `store`, and `generator` are required. The
/// chunker defaults to a [`CharacterChunker`] built from the config's
/// chunk parameters.
#[derive(Default)]
pub struct DocChatPipelineBuilder {
    config: Option<DocChatConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
    generator: Option<Arc<dyn AnswerGenerator>>,
}

impl DocChatPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: DocChatConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the default chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the answer generator.
    pub fn generator(mut self, generator: Arc<dyn AnswerGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`DocChatPipeline`], validating that all required fields
    /// are set.
    ///
    /// # Errors
    ///
    /// Returns [`DocChatError::ConfigError`] if a required field is
    /// missing or the config's chunk parameters are invalid.
    pub fn build(self) -> Result<DocChatPipeline> {
        let config = self
            .config
            .ok_or_else(|| DocChatError::ConfigError("config is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| DocChatError::ConfigError("embedder is required".to_string()))?;
        let store = self
            .store
            .ok_or_else(|| DocChatError::ConfigError("store is required".to_string()))?;
        let generator = self
            .generator
            .ok_or_else(|| DocChatError::ConfigError("generator is required".to_string()))?;

        let chunker = match self.chunker {
            Some(chunker) => chunker,
            None => Arc::new(CharacterChunker::new(config.chunk_size, config.chunk_overlap)?),
        };

        let prompt_builder = PromptBuilder::new(config.history_window);

        Ok(DocChatPipeline { config, embedder, store, chunker, generator, prompt_builder })
    }
}
