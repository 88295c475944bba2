//! Retrieval-augmented question answering over PDF documents.
//!
//! `docchat` lets a caller upload a PDF, build a semantic index over its
//! text, and answer free-form questions by retrieving relevant passages
//! and asking a hosted LLM to compose an answer, optionally conditioned
//! on recent conversation turns.
//!
//! The crate exposes two entry points on [`DocChatPipeline`]:
//! [`index_document`](DocChatPipeline::index_document) and
//! [`answer_question`](DocChatPipeline::answer_question). Everything
//! around them — page layout, session persistence, display formatting —
//! is the caller's concern.
//!
//! Each stage sits behind a trait so backends can be swapped or mocked:
//!
//! - [`Chunker`] — fixed-size splitting with overlap ([`CharacterChunker`])
//! - [`EmbeddingProvider`] — text to vectors ([`LocalEmbeddingProvider`]
//!   with the `local-embeddings` feature)
//! - [`VectorStore`] — persistence plus top-k cosine search
//!   ([`FlatIndexStore`], [`SqliteVectorStore`])
//! - [`AnswerGenerator`] — one prompt, one completion ([`GeminiGenerator`]
//!   with the `gemini` feature)

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod generation;
#[cfg(feature = "local-embeddings")]
pub mod local;
pub mod pipeline;
pub mod prompt;
pub mod store;

pub use chunking::{CharacterChunker, Chunker};
pub use config::{DocChatConfig, DocChatConfigBuilder};
pub use document::{Chunk, ConversationTurn, IndexEntry, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{DocChatError, Result};
#[cfg(feature = "gemini")]
pub use gemini::GeminiGenerator;
pub use generation::AnswerGenerator;
#[cfg(feature = "local-embeddings")]
pub use local::LocalEmbeddingProvider;
pub use pipeline::{DocChatPipeline, DocChatPipelineBuilder};
pub use prompt::PromptBuilder;
pub use store::{FlatIndexStore, SqliteVectorStore, VectorBackend, VectorStore, open_store};
