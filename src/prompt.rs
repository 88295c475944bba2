//! Prompt assembly from retrieved context, chat history, and the question.

use std::fmt::Write;

use crate::document::ConversationTurn;

/// Instruction prefix for every prompt: answer only from the supplied
/// context, and admit ignorance rather than invent an answer.
const SYSTEM_INSTRUCTION: &str = "Use the following pieces of context to answer the question at the end.\n\
If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\n\
You can also reference the previous conversation history to provide better context-aware answers.";

/// Assembles the single instruction string sent to the answer generator.
///
/// The prompt always contains, in fixed order: the system instruction,
/// the formatted chat history (most-recent-last, capped to the last
/// `history_window` turns), the retrieved context chunks joined by
/// newlines in ranked order, and the current question.
///
/// Chunks are not deduplicated and no length budget is enforced against
/// the generator's context window; very large documents plus long history
/// can exceed the provider's limit.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    history_window: usize,
}

impl PromptBuilder {
    /// Create a builder that keeps the last `history_window` turns.
    pub fn new(history_window: usize) -> Self {
        Self { history_window }
    }

    /// The configured history window.
    pub fn history_window(&self) -> usize {
        self.history_window
    }

    /// Build the prompt.
    pub fn build(
        &self,
        context: &[String],
        history: &[ConversationTurn],
        question: &str,
    ) -> String {
        let mut prompt = String::from(SYSTEM_INSTRUCTION);

        prompt.push_str("\n\nPrevious conversation history:\n");
        if history.is_empty() {
            prompt.push_str("No previous conversation.\n");
        } else {
            let skip = history.len().saturating_sub(self.history_window);
            for turn in &history[skip..] {
                let _ = writeln!(prompt, "Q: {}\nA: {}\n", turn.question, turn.answer);
            }
        }

        prompt.push_str("\nCurrent context from documents:\n");
        prompt.push_str(&context.join("\n"));

        let _ = write!(prompt, "\n\nCurrent question: {question}\n\nAnswer:");

        prompt
    }
}
