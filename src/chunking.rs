//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`CharacterChunker`],
//! a fixed-size splitter with configurable overlap between neighbours.

use crate::document::Chunk;
use crate::error::{DocChatError, Result};

/// A strategy for splitting extracted document text into chunks.
///
/// Implementations produce [`Chunk`]s with text and character spans but no
/// embeddings; embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Returns an empty `Vec` for empty input.
    fn chunk(&self, text: &str) -> Vec<Chunk>;
}

/// Splits text into fixed-size chunks by character count with overlap.
///
/// Consecutive chunks share exactly `overlap` characters, so concatenating
/// the first chunk with every following chunk minus its first `overlap`
/// characters reconstructs the input exactly. Text no longer than
/// `size` yields a single chunk. Offsets are character positions, so a
/// chunk boundary never lands inside a multi-byte code point.
///
/// # Example
///
/// ```rust,ignore
/// use docchat::CharacterChunker;
///
/// let chunker = CharacterChunker::new(1000, 100)?;
/// let chunks = chunker.chunk(&text);
/// ```
#[derive(Debug, Clone)]
pub struct CharacterChunker {
    size: usize,
    overlap: usize,
}

impl CharacterChunker {
    /// Create a new `CharacterChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`DocChatError::ConfigError`] if `overlap >= size`, which
    /// would make the splitter loop without advancing.
    pub fn new(size: usize, overlap: usize) -> Result<Self> {
        if overlap >= size {
            return Err(DocChatError::ConfigError(format!(
                "chunk overlap ({overlap}) must be less than chunk size ({size})"
            )));
        }
        Ok(Self { size, overlap })
    }
}

impl Chunker for CharacterChunker {
    fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character, so spans can be cut without
        // scanning from the front for each chunk.
        let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let char_len = offsets.len();
        let byte_at = |pos: usize| if pos == char_len { text.len() } else { offsets[pos] };

        let step = self.size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.size).min(char_len);
            chunks.push(Chunk {
                text: text[byte_at(start)..byte_at(end)].to_string(),
                start,
                end,
            });
            // Stopping at the first chunk that reaches the end keeps the
            // overlap exact: every chunk but the last is full-sized, and
            // the last one is always longer than the overlap.
            if end == char_len {
                break;
            }
            start += step;
        }

        chunks
    }
}
