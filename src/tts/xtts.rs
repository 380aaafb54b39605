//! XTTS-v2 backend using PyO3 to embed Python.
//!
//! Wraps the Coqui TTS `Xtts` model for voice-cloned synthesis. The model
//! and its config are loaded once and kept for the lifetime of the
//! backend; each call synthesizes one sub-chunk of text.

use super::{Result, Synthesizer, TtsError};
use log::debug;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::path::{Path, PathBuf};
use std::sync::Once;

/// Initialize the Python runtime once.
static PYTHON_INIT: Once = Once::new();

/// Sample rate of the XTTS-v2 vocoder.
const XTTS_SAMPLE_RATE: u32 = 24_000;

/// Conditioning length in seconds for the GPT speaker encoder.
const GPT_COND_LEN: u32 = 3;

/// XTTS-v2 voice-cloning backend.
pub struct XttsBackend {
    model: Py<PyAny>,
    xtts_config: Py<PyAny>,
    speaker_ref: PathBuf,
    language: String,
}

impl XttsBackend {
    /// Load the model from `model_dir`, which must contain `config.json`
    /// and the checkpoint files.
    ///
    /// # Arguments
    /// * `model_dir` - XTTS-v2 model directory
    /// * `speaker_ref` - Reference speaker audio for voice cloning
    /// * `language` - Language code passed to the model (e.g. "en")
    /// * `use_gpu` - Move the model to CUDA after loading
    pub fn load(
        model_dir: &Path,
        speaker_ref: &Path,
        language: &str,
        use_gpu: bool,
    ) -> Result<Self> {
        let config_path = model_dir.join("config.json");
        if !config_path.is_file() {
            return Err(TtsError::Config(format!(
                "model config not found: {}",
                config_path.display()
            )));
        }
        if !speaker_ref.is_file() {
            return Err(TtsError::Config(format!(
                "speaker reference not found: {}",
                speaker_ref.display()
            )));
        }

        PYTHON_INIT.call_once(|| {
            pyo3::prepare_freethreaded_python();
        });

        let (model, xtts_config) = Python::with_gil(|py| -> PyResult<(Py<PyAny>, Py<PyAny>)> {
            let config_mod = py.import("TTS.tts.configs.xtts_config")?;
            let xtts_config = config_mod.getattr("XttsConfig")?.call0()?;
            xtts_config
                .call_method1("load_json", (config_path.to_string_lossy().as_ref(),))?;

            let model_mod = py.import("TTS.tts.models.xtts")?;
            let xtts_class = model_mod.getattr("Xtts")?;
            let model = xtts_class.call_method1("init_from_config", (&xtts_config,))?;

            let kwargs = PyDict::new(py);
            kwargs.set_item("checkpoint_dir", model_dir.to_string_lossy().as_ref())?;
            kwargs.set_item("eval", true)?;
            model.call_method("load_checkpoint", (&xtts_config,), Some(&kwargs))?;

            if use_gpu {
                model.call_method0("cuda")?;
            }

            Ok((model.unbind(), xtts_config.unbind()))
        })
        .map_err(|e| TtsError::Config(format!("failed to load XTTS model: {e}")))?;

        Ok(Self {
            model,
            xtts_config,
            speaker_ref: speaker_ref.to_path_buf(),
            language: language.to_string(),
        })
    }
}

impl Synthesizer for XttsBackend {
    fn synthesize(&self, text: &str) -> Result<Vec<f32>> {
        debug!("generating audio for <{text}>");
        Python::with_gil(|py| -> PyResult<Vec<f32>> {
            let model = self.model.bind(py);

            let kwargs = PyDict::new(py);
            kwargs.set_item("speaker_wav", self.speaker_ref.to_string_lossy().as_ref())?;
            kwargs.set_item("gpt_cond_len", GPT_COND_LEN)?;
            kwargs.set_item("language", &self.language)?;

            let output =
                model.call_method("synthesize", (text, self.xtts_config.bind(py)), Some(&kwargs))?;

            // The model returns a dict with the waveform under "wav".
            let wav = output.get_item("wav")?;
            wav.call_method0("tolist")?.extract::<Vec<f32>>()
        })
        .map_err(|e| TtsError::Synthesis(format!("model failed on chunk: {e}")))
    }

    fn sample_rate(&self) -> u32 {
        XTTS_SAMPLE_RATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_missing_model_dir() {
        // Path validation happens before the Python runtime is touched.
        let result = XttsBackend::load(
            Path::new("/nonexistent/xtts"),
            Path::new("/nonexistent/speaker.wav"),
            "en",
            false,
        );
        match result {
            Err(TtsError::Config(msg)) => {
                assert!(msg.contains("config.json"), "unexpected message: {msg}");
            }
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }
}
