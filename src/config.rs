//! gen-speech configuration management.

use crate::text::{DEFAULT_BREAK_MARKER, DEFAULT_MAX_CHUNK_CHARS};
use crate::tts::TtsError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Silence inserted at each break marker, in milliseconds.
const DEFAULT_PAUSE_MS: u32 = 1250;

/// Speaker reference shipped with the XTTS-v2 model directory.
const BUNDLED_SPEAKER_SAMPLE: &str = "samples/en_sample.wav";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Directory holding the XTTS-v2 model (config.json + checkpoint)
    #[serde(default)]
    pub model_dir: Option<PathBuf>,

    /// Speaker reference audio for voice cloning. Defaults to the sample
    /// bundled with the model directory.
    #[serde(default)]
    pub speaker_ref: Option<PathBuf>,

    /// Language code passed to the model
    #[serde(default = "default_language")]
    pub language: String,

    /// Move the model to CUDA after loading
    #[serde(default)]
    pub use_gpu: bool,

    /// Token marking explicit pause points in input text
    #[serde(default = "default_break_marker")]
    pub break_marker: String,

    /// Maximum characters per model invocation
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Pause duration at each break marker, in milliseconds
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u32,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_break_marker() -> String {
    DEFAULT_BREAK_MARKER.to_string()
}

fn default_max_chunk_chars() -> usize {
    DEFAULT_MAX_CHUNK_CHARS
}

fn default_pause_ms() -> u32 {
    DEFAULT_PAUSE_MS
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            speaker_ref: None,
            language: default_language(),
            use_gpu: false,
            break_marker: default_break_marker(),
            max_chunk_chars: default_max_chunk_chars(),
            pause_ms: default_pause_ms(),
        }
    }
}

impl SpeechConfig {
    /// Get the config file path: ~/.config/gen-speech/config.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("gen-speech")
            .join("config.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: SpeechConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Resolve the model and speaker paths, falling back to the speaker
    /// sample bundled with the model directory. Existence of the files is
    /// checked when the backend loads, before any synthesis begins.
    pub fn resolve_paths(&self) -> std::result::Result<(PathBuf, PathBuf), TtsError> {
        let model_dir = self.model_dir.clone().ok_or_else(|| {
            TtsError::Config(
                "model_dir is not set; run 'gen-speech config set-model-dir <path>'".to_string(),
            )
        })?;

        let speaker_ref = self
            .speaker_ref
            .clone()
            .unwrap_or_else(|| model_dir.join(BUNDLED_SPEAKER_SAMPLE));

        Ok((model_dir, speaker_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SpeechConfig::default();
        assert!(config.model_dir.is_none());
        assert!(config.speaker_ref.is_none());
        assert_eq!(config.language, "en");
        assert!(!config.use_gpu);
        assert_eq!(config.break_marker, "@BRK#");
        assert_eq!(config.max_chunk_chars, 250);
        assert_eq!(config.pause_ms, 1250);
    }

    #[test]
    fn test_config_path() {
        let path = SpeechConfig::config_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.ends_with("gen-speech/config.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
model_dir = "/models/xtts-v2"
speaker_ref = "/voices/narrator.wav"
language = "de"
use_gpu = true
pause_ms = 800
"#;
        let config: SpeechConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model_dir, Some(PathBuf::from("/models/xtts-v2")));
        assert_eq!(
            config.speaker_ref,
            Some(PathBuf::from("/voices/narrator.wav"))
        );
        assert_eq!(config.language, "de");
        assert!(config.use_gpu);
        assert_eq!(config.pause_ms, 800);
        // Untouched fields keep their defaults.
        assert_eq!(config.max_chunk_chars, 250);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: SpeechConfig = toml::from_str("").unwrap();
        assert_eq!(config.break_marker, "@BRK#");
        assert_eq!(config.pause_ms, 1250);
    }

    #[test]
    fn test_resolve_paths_requires_model_dir() {
        let config = SpeechConfig::default();
        assert!(matches!(
            config.resolve_paths(),
            Err(TtsError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_paths_falls_back_to_bundled_speaker() {
        let config = SpeechConfig {
            model_dir: Some(PathBuf::from("/models/xtts-v2")),
            ..Default::default()
        };
        let (model_dir, speaker_ref) = config.resolve_paths().unwrap();
        assert_eq!(model_dir, PathBuf::from("/models/xtts-v2"));
        assert_eq!(
            speaker_ref,
            PathBuf::from("/models/xtts-v2/samples/en_sample.wav")
        );
    }
}
