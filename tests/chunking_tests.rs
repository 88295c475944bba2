//! Property and unit tests for fixed-size chunking.

use docchat::{CharacterChunker, Chunker, DocChatError};
use proptest::prelude::*;

/// Rebuild the original text from chunks by dropping each chunk's leading
/// overlap characters.
fn reassemble(chunks: &[docchat::Chunk], overlap: usize) -> String {
    let mut rebuilt = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            rebuilt.push_str(&chunk.text);
        } else {
            rebuilt.extend(chunk.text.chars().skip(overlap));
        }
    }
    rebuilt
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Concatenating chunks with the overlapping regions removed must
    /// reconstruct the input exactly, for any valid (size, overlap).
    #[test]
    fn round_trip_reconstructs_input(
        (size, overlap) in (2usize..64).prop_flat_map(|s| (Just(s), 0..s)),
        text in "[a-zA-Z0-9 .,!?]{0,300}",
    ) {
        let chunker = CharacterChunker::new(size, overlap).unwrap();
        let chunks = chunker.chunk(&text);

        if text.is_empty() {
            prop_assert!(chunks.is_empty());
        } else {
            prop_assert_eq!(reassemble(&chunks, overlap), text);
        }
    }

    /// Consecutive chunks share exactly `overlap` characters, and every
    /// chunk's span matches its text.
    #[test]
    fn neighbours_share_exact_overlap(
        (size, overlap) in (2usize..64).prop_flat_map(|s| (Just(s), 0..s)),
        text in "[a-z ]{1,300}",
    ) {
        let chunker = CharacterChunker::new(size, overlap).unwrap();
        let chunks = chunker.chunk(&text);
        let all: Vec<char> = text.chars().collect();

        for chunk in &chunks {
            let span: String = all[chunk.start..chunk.end].iter().collect();
            prop_assert_eq!(&span, &chunk.text);
        }

        for window in chunks.windows(2) {
            let prev_tail: String =
                window[0].text.chars().skip(window[0].text.chars().count() - overlap).collect();
            let next_head: String = window[1].text.chars().take(overlap).collect();
            prop_assert_eq!(prev_tail, next_head);
            prop_assert_eq!(window[0].end - window[1].start, overlap);
        }
    }
}

#[test]
fn short_text_yields_single_chunk() {
    let chunker = CharacterChunker::new(1000, 100).unwrap();
    let chunks = chunker.chunk("just a short sentence");

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "just a short sentence");
    assert_eq!(chunks[0].start, 0);
    assert_eq!(chunks[0].end, "just a short sentence".chars().count());
}

#[test]
fn text_of_exactly_chunk_size_yields_single_chunk() {
    let chunker = CharacterChunker::new(5, 2).unwrap();
    let chunks = chunker.chunk("abcde");

    assert_eq!(chunks.len(), 1);
}

#[test]
fn multibyte_text_never_splits_code_points() {
    let chunker = CharacterChunker::new(4, 1).unwrap();
    let text = "héllo wörld émoji 😀 end";
    let chunks = chunker.chunk(text);

    assert_eq!(reassemble(&chunks, 1), text);
    for chunk in &chunks {
        assert!(chunk.text.chars().count() <= 4);
    }
}

#[test]
fn overlap_equal_to_size_is_rejected() {
    let err = CharacterChunker::new(100, 100).unwrap_err();
    assert!(matches!(err, DocChatError::ConfigError(_)));
}

#[test]
fn overlap_greater_than_size_is_rejected() {
    let err = CharacterChunker::new(100, 250).unwrap_err();
    assert!(matches!(err, DocChatError::ConfigError(_)));
}
