//! Assembling one waveform from marked-up input text.
//!
//! Drives the break splitter and chunker, invokes the synthesis backend
//! per sub-chunk, and concatenates everything in order with pauses
//! between segments.

use super::SampleBuffer;
use crate::text::{chunk_text, split_on_breaks};
use crate::tts::{Result, Synthesizer};
use log::debug;

/// Assembles synthesized audio for one text at a time.
///
/// Synthesis is strictly sequential: sub-chunks are sent to the model in
/// order and their samples appended in the same order, with no batching
/// and no retries. A model failure on any sub-chunk aborts the whole
/// request before anything reaches an encoder.
pub struct Assembler<'a> {
    synth: &'a dyn Synthesizer,
    break_marker: &'a str,
    max_chunk_chars: usize,
    pause_ms: u32,
}

impl<'a> Assembler<'a> {
    /// Create an assembler over the given backend.
    ///
    /// # Arguments
    /// * `synth` - The synthesis backend
    /// * `break_marker` - Token marking explicit pause points in the text
    /// * `max_chunk_chars` - Maximum characters per model invocation
    /// * `pause_ms` - Silence inserted at each break, in milliseconds
    pub fn new(
        synth: &'a dyn Synthesizer,
        break_marker: &'a str,
        max_chunk_chars: usize,
        pause_ms: u32,
    ) -> Self {
        Self {
            synth,
            break_marker,
            max_chunk_chars,
            pause_ms,
        }
    }

    /// Synthesize `text` into a single ordered sample buffer.
    ///
    /// A pause follows every segment except the last; a segment that is
    /// empty (adjacent markers) contributes no audio but still counts for
    /// pause placement.
    pub fn synthesize(&self, text: &str) -> Result<SampleBuffer> {
        let segments = split_on_breaks(text, self.break_marker);
        let mut buffer = SampleBuffer::new(self.synth.sample_rate());

        let last = segments.len() - 1;
        for (i, segment) in segments.iter().enumerate() {
            for chunk in chunk_text(segment, self.max_chunk_chars) {
                debug!("synthesizing chunk of {} chars", chunk.chars().count());
                let samples = self.synth.synthesize(&chunk)?;
                buffer.append(&samples);
            }

            if i < last {
                debug!("inserting {} ms pause", self.pause_ms);
                buffer.append_silence(self.pause_ms);
            }
        }

        debug!(
            "assembled {} samples ({:.1}s)",
            buffer.len(),
            buffer.duration_secs()
        );
        Ok(buffer)
    }
}
