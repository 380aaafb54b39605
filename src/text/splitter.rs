//! Splitting input text on the break marker.

use log::debug;

/// Split text on `marker` into ordered segments.
///
/// Returns the whole text as a single segment when the marker does not
/// occur (or is empty). Adjacent markers and markers at the string
/// boundaries produce empty segments; the chunker drops those later, but
/// they still count for pause placement.
pub fn split_on_breaks<'a>(text: &'a str, marker: &str) -> Vec<&'a str> {
    if marker.is_empty() || !text.contains(marker) {
        debug!("no break marker found in text");
        return vec![text];
    }

    let segments: Vec<&str> = text.split(marker).collect();
    debug!("split text into {} segments", segments.len());
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_markers() {
        let segments = split_on_breaks("a@BRK#b@BRK#c", "@BRK#");
        assert_eq!(segments, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_no_marker_passes_through() {
        let segments = split_on_breaks("abc", "@BRK#");
        assert_eq!(segments, vec!["abc"]);
    }

    #[test]
    fn test_empty_input() {
        let segments = split_on_breaks("", "@BRK#");
        assert_eq!(segments, vec![""]);
    }

    #[test]
    fn test_adjacent_markers_yield_empty_segments() {
        let segments = split_on_breaks("a@BRK#@BRK#b", "@BRK#");
        assert_eq!(segments, vec!["a", "", "b"]);
    }

    #[test]
    fn test_markers_at_boundaries() {
        let segments = split_on_breaks("@BRK#middle@BRK#", "@BRK#");
        assert_eq!(segments, vec!["", "middle", ""]);
    }

    #[test]
    fn test_empty_marker_is_not_split() {
        let segments = split_on_breaks("abc", "");
        assert_eq!(segments, vec!["abc"]);
    }
}
