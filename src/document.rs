//! Data types for chunks, index entries, search results, and chat turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bounded segment of a source document, the unit of retrieval.
///
/// `start` and `end` are character offsets into the extracted document
/// text. Chunks are immutable once produced by a
/// [`Chunker`](crate::chunking::Chunker).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The text content of the chunk.
    pub text: String,
    /// Character offset of the first character of the chunk.
    pub start: usize,
    /// Character offset one past the last character of the chunk.
    pub end: usize,
}

/// A chunk's text paired with its embedding vector, as persisted by a
/// [`VectorStore`](crate::store::VectorStore).
///
/// Every entry in one store has the same dimensionality, fixed by the
/// embedding model that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexEntry {
    /// The text content of the stored chunk.
    pub text: String,
    /// The embedding vector for the text.
    pub embedding: Vec<f32>,
}

/// A retrieved chunk text paired with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The text of the retrieved chunk.
    pub text: String,
    /// Cosine similarity to the query (higher is more relevant).
    pub score: f32,
}

/// One question-and-answer exchange in a conversation.
///
/// Turns are owned by the caller as an append-only list and passed into
/// the pipeline as conversational context; the prompt builder caps them
/// to its configured window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
    /// The question the user asked.
    pub question: String,
    /// The answer that was given.
    pub answer: String,
    /// When the exchange happened.
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a turn stamped with the current time.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into(), timestamp: Utc::now() }
    }
}
