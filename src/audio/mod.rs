//! Audio assembly: the sample buffer, the assembler, and output encoders.

pub mod assembler;
pub mod encoder;
pub mod tags;

pub use assembler::Assembler;

/// Sample rate of the XTTS-v2 vocoder output, in Hz.
pub const SAMPLE_RATE: u32 = 24_000;

/// Mono PCM samples accumulated during one synthesis call.
///
/// Owned exclusively by the assembler while it runs, then handed to an
/// encoder once complete. Not shared across concurrent calls.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create an empty buffer at the given sample rate.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    /// Append synthesized samples to the end of the buffer.
    pub fn append(&mut self, samples: &[f32]) {
        self.samples.extend_from_slice(samples);
    }

    /// Append `ms` milliseconds of silence (zero-valued samples).
    pub fn append_silence(&mut self, ms: u32) {
        let count = (self.sample_rate / 1000) as usize * ms as usize;
        self.samples.resize(self.samples.len() + count, 0.0);
    }

    /// The accumulated samples, in playback order.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples in the buffer.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer contains no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the buffered audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
