//! Writing the assembled sample buffer to disk.
//!
//! WAV output goes straight through hound; MP3 output writes a temporary
//! WAV and shells out to ffmpeg, which also applies the metadata tags.

use super::SampleBuffer;
use super::tags::{AudioTags, write_ffmetadata};
use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Output container formats this tool can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Mp3,
    Wav,
}

impl OutputFormat {
    /// File extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Wav => "wav",
        }
    }

    /// Parse a format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(OutputFormat::Mp3),
            "wav" => Some(OutputFormat::Wav),
            _ => None,
        }
    }
}

/// Writes a completed sample buffer to a container format and applies
/// metadata tags.
///
/// Encoders only ever see fully assembled buffers; if assembly failed, no
/// file is written.
pub trait Encoder {
    fn write(&self, buffer: &SampleBuffer, tags: &AudioTags, output_path: &Path) -> Result<()>;
}

/// Create an encoder for the given output format.
pub fn create_encoder(format: OutputFormat) -> Box<dyn Encoder> {
    match format {
        OutputFormat::Mp3 => Box::new(Mp3Encoder),
        OutputFormat::Wav => Box::new(WavEncoder),
    }
}

/// Lossless WAV output via hound.
///
/// WAV carries no tags; the metadata argument is accepted for interface
/// parity and ignored.
pub struct WavEncoder;

impl Encoder for WavEncoder {
    fn write(&self, buffer: &SampleBuffer, _tags: &AudioTags, output_path: &Path) -> Result<()> {
        write_wav(buffer, output_path)?;
        info!("saved audio to {}", output_path.display());
        Ok(())
    }
}

/// MP3 output via ffmpeg, with tags applied from an FFMETADATA1 file.
pub struct Mp3Encoder;

impl Encoder for Mp3Encoder {
    fn write(&self, buffer: &SampleBuffer, tags: &AudioTags, output_path: &Path) -> Result<()> {
        let temp_dir = TempDir::new()?;

        let wav_path = temp_dir.path().join("assembled.wav");
        write_wav(buffer, &wav_path)?;

        let metadata_path = temp_dir.path().join("metadata.txt");
        write_ffmetadata(tags, &metadata_path)?;

        let output = Command::new("ffmpeg")
            .args(["-y", "-i"])
            .arg(&wav_path)
            .arg("-i")
            .arg(&metadata_path)
            .args([
                "-map_metadata",
                "1",
                "-id3v2_version",
                "3",
                "-codec:a",
                "libmp3lame",
                "-qscale:a",
                "2",
            ])
            .arg(output_path)
            .output()
            .context("Failed to run ffmpeg")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("ffmpeg mp3 encoding failed: {}", stderr);
        }

        info!("saved audio to {}", output_path.display());
        Ok(())
    }
}

/// Write the buffer as mono 32-bit float WAV.
fn write_wav(buffer: &SampleBuffer, path: &Path) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file at {}", path.display()))?;
    for &sample in buffer.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize().context("Failed to finalize WAV file")?;

    Ok(())
}

/// Check if ffmpeg is available (required for mp3 output).
pub fn is_ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
