//! Answer generator trait for composing answers from an assembled prompt.

use async_trait::async_trait;

use crate::error::Result;

/// A generator that sends one prompt to a hosted LLM and returns its
/// completion text verbatim.
///
/// The interface is deliberately minimal so the generator can be swapped
/// or mocked in tests without touching the rest of the pipeline. One call
/// per prompt: no streaming, no retries; a transient provider failure is
/// a hard failure for that question.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate a completion for the prompt.
    ///
    /// # Errors
    ///
    /// Returns [`DocChatError::GenerationError`](crate::DocChatError::GenerationError)
    /// on any transport or API-level failure.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
