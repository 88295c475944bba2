//! Error types for the `docchat` crate.

use thiserror::Error;

/// Errors that can occur in the document question-answering pipeline.
#[derive(Debug, Error)]
pub enum DocChatError {
    /// The uploaded bytes were not a readable PDF or contained no text.
    #[error("Extraction error: {0}")]
    ExtractionError(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A question was asked before any document was indexed.
    ///
    /// Callers presenting a chat surface typically translate this into a
    /// human-readable message; the pipeline itself never manufactures prose.
    #[error("no document indexed yet")]
    NotIndexed,

    /// The hosted LLM call failed at the transport or API level.
    #[error("Generation error ({provider}): {message}")]
    GenerationError {
        /// The answer generator that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error in the pipeline orchestration.
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

/// A convenience result type for docchat operations.
pub type Result<T> = std::result::Result<T, DocChatError>;
