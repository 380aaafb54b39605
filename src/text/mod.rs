//! Text processing for synthesis: break-marker splitting and
//! length-bounded chunking.

pub mod chunker;
pub mod splitter;

pub use chunker::{DEFAULT_MAX_CHUNK_CHARS, chunk_text};
pub use splitter::split_on_breaks;

/// Break marker recognized in input text. Each occurrence becomes an
/// explicit pause in the output audio; the marker itself is never spoken.
pub const DEFAULT_BREAK_MARKER: &str = "@BRK#";
