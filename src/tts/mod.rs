//! Synthesis backend trait and error taxonomy.

pub mod xtts;

use std::path::Path;
use thiserror::Error;

/// Errors from the synthesis layer.
#[derive(Error, Debug)]
pub enum TtsError {
    /// Model or speaker reference paths missing or unreadable. Surfaced
    /// before any synthesis begins.
    #[error("configuration error: {0}")]
    Config(String),

    /// The model failed while generating audio for a sub-chunk. Fatal for
    /// the whole request; no partial output is persisted.
    #[error("synthesis failed: {0}")]
    Synthesis(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TtsError>;

/// A black-box text-to-waveform model.
///
/// Implementations wrap a stateful, typically GPU-bound singleton; callers
/// wanting parallel synthesis of independent texts must hold one instance
/// per concurrent request or serialize access themselves.
pub trait Synthesizer {
    /// Synthesize one sub-chunk of text into mono samples.
    fn synthesize(&self, text: &str) -> Result<Vec<f32>>;

    /// Output sample rate in Hz.
    fn sample_rate(&self) -> u32;
}

/// Price per 1000 characters for local XTTS synthesis.
pub const PRICE_PER_1K_CHARS: f64 = 0.0;

/// Estimate the cost of synthesizing `total_chars` characters, rounded up
/// to whole blocks of 1000.
pub fn estimate_cost(total_chars: usize, price_per_1k: f64) -> f64 {
    (total_chars as f64 / 1000.0).ceil() * price_per_1k
}

/// Create the XTTS synthesis backend.
///
/// # Arguments
/// * `model_dir` - Directory holding `config.json` and the checkpoint files
/// * `speaker_ref` - Reference speaker audio for voice cloning
/// * `language` - Language code passed to the model (e.g. "en")
/// * `use_gpu` - Move the model to CUDA after loading
pub fn create_backend(
    model_dir: &Path,
    speaker_ref: &Path,
    language: &str,
    use_gpu: bool,
) -> Result<Box<dyn Synthesizer>> {
    Ok(Box::new(xtts::XttsBackend::load(
        model_dir,
        speaker_ref,
        language,
        use_gpu,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_cost_rounds_up_to_blocks() {
        assert_eq!(estimate_cost(0, 0.1), 0.0);
        assert_eq!(estimate_cost(1, 0.1), 0.1);
        assert_eq!(estimate_cost(1000, 0.1), 0.1);
        assert_eq!(estimate_cost(1001, 0.1), 0.2);
    }

    #[test]
    fn test_xtts_is_free() {
        assert_eq!(estimate_cost(1_000_000, PRICE_PER_1K_CHARS), 0.0);
    }
}
