//! PDF text extraction.

use tracing::info;

use crate::error::{DocChatError, Result};

/// Extract the textual content of a PDF byte stream.
///
/// Pages are concatenated in page order into a single string. The input is
/// never written anywhere; the only output is the returned text.
///
/// # Errors
///
/// Returns [`DocChatError::ExtractionError`] if the bytes are not a
/// readable PDF or if the document contains no extractable text.
pub fn pdf_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| DocChatError::ExtractionError(format!("failed to parse PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(DocChatError::ExtractionError(
            "PDF contains no extractable text".to_string(),
        ));
    }

    info!(byte_len = bytes.len(), text_len = text.len(), "extracted PDF text");
    Ok(text)
}
