//! Greedy length-bounded chunking for a model with a fixed maximum
//! utterance length.

/// Default maximum sub-chunk size in characters (XTTS utterance limit).
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 250;

/// Sentence-ending punctuation, the preferred cut points.
const SENTENCE_ENDINGS: &[char] = &['.', '?', '!'];

/// Split a segment into sub-chunks of at most `max_chars` characters.
///
/// Works left to right over the remaining text. While more than
/// `max_chars` characters remain, the cut point is chosen inside the
/// leading window of `max_chars` characters, rightmost match first:
/// sentence-ending punctuation (kept in the emitted chunk), then a space
/// (left as the remainder's leading character), then a hard cut at the
/// window edge. Concatenating the returned chunks reproduces `segment`
/// exactly; an empty segment yields no chunks.
///
/// # Panics
/// Panics if `max_chars` is zero.
pub fn chunk_text(segment: &str, max_chars: usize) -> Vec<String> {
    assert!(max_chars > 0, "max_chars must be at least 1");

    let mut chunks = Vec::new();
    let mut rest = segment;

    while !rest.is_empty() {
        // Byte offset just past the first `max_chars` characters.
        let window_end = match rest.char_indices().nth(max_chars) {
            Some((idx, _)) => idx,
            None => {
                // Everything left fits in one final chunk.
                chunks.push(rest.to_string());
                break;
            }
        };
        let window = &rest[..window_end];

        let cut = match window.rfind(SENTENCE_ENDINGS) {
            // Keep the punctuation mark with the emitted chunk.
            Some(p) => p + 1,
            None => match window.rfind(' ') {
                // A space at offset 0 would cut nothing; fall through to
                // the hard cut so every iteration makes progress.
                Some(p) if p > 0 => p,
                _ => window_end,
            },
        };

        chunks.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_segment_emitted_whole() {
        let chunks = chunk_text("Hello world.", 250);
        assert_eq!(chunks, vec!["Hello world."]);
    }

    #[test]
    fn test_segment_of_exactly_max_len() {
        let text = "x".repeat(10);
        let chunks = chunk_text(&text, 10);
        assert_eq!(chunks, vec![text]);
    }

    #[test]
    fn test_empty_segment_yields_no_chunks() {
        assert!(chunk_text("", 250).is_empty());
    }

    #[test]
    fn test_cuts_after_rightmost_punctuation() {
        let chunks = chunk_text("Hello world. This is a test of chunking.", 15);
        assert_eq!(chunks[0], "Hello world.");
        // The space after the period stays with the remainder.
        assert_eq!(
            chunks,
            vec!["Hello world.", " This is a", " test of", " chunking."]
        );
    }

    #[test]
    fn test_question_and_exclamation_count_as_endings() {
        let chunks = chunk_text("Really? Yes! Absolutely sure about it", 12);
        assert_eq!(chunks[0], "Really? Yes!");
    }

    #[test]
    fn test_space_fallback_when_no_punctuation() {
        let chunks = chunk_text("alpha beta gamma", 8);
        assert_eq!(chunks, vec!["alpha", " beta", " gamma"]);
    }

    #[test]
    fn test_hard_split_single_long_token() {
        let text = "a".repeat(300);
        let chunks = chunk_text(&text, 250);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 250);
        assert_eq!(chunks[1].len(), 50);
    }

    #[test]
    fn test_leading_space_does_not_stall() {
        // Rightmost space at offset 0 must not produce a zero-length cut.
        let text = format!(" {}", "b".repeat(300));
        let chunks = chunk_text(&text, 250);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_multibyte_characters_are_counted_not_sliced() {
        let text = "äöü".repeat(100);
        let chunks = chunk_text(&text, 7);
        assert_eq!(chunks.concat(), text);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 7);
        }
    }

    #[test]
    fn test_whitespace_only_segment_still_partitions() {
        let text = " ".repeat(600);
        let chunks = chunk_text(&text, 250);
        assert_eq!(chunks.concat(), text);
    }

    proptest! {
        #[test]
        fn prop_lossless_partition(segment in ".*", max_chars in 1usize..=20) {
            let chunks = chunk_text(&segment, max_chars);
            prop_assert_eq!(chunks.concat(), segment);
        }

        #[test]
        fn prop_chunks_are_bounded_and_nonempty(segment in ".*", max_chars in 1usize..=20) {
            for chunk in chunk_text(&segment, max_chars) {
                let len = chunk.chars().count();
                prop_assert!(len >= 1);
                prop_assert!(len <= max_chars);
            }
        }
    }
}
