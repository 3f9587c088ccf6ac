use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::{SynthesisResult, WavBackend};

use super::synth::{self, SynthesisProfile, REFERENCE_DURATION_SECS, SAMPLE_RATE};
use super::voices::{VoiceProfile, VOICES};

/// Models registered even when the models directory does not provide them.
pub const DEFAULT_MODELS: [&str; 2] = ["tts-1", "tts-1-max"];

/// Languages advertised by the default model configs.
pub const DEFAULT_LANGUAGES: [&str; 10] = ["en", "ja", "zh", "ko", "de", "fr", "es", "it", "pt", "ru"];

/// Subdirectory of the models directory holding per-voice reference audio.
pub const REFERENCE_AUDIO_DIR: &str = "reference_audio";

#[derive(thiserror::Error, Debug)]
pub enum PlaceholderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Model not loaded. Call load_model() first.")]
    ModelNotLoaded,
    #[error("Model '{0}' not found. Call list_models() to see available models.")]
    ModelNotFound(String),
    #[error("Voice id '{0}' cannot be used as a reference audio file name")]
    InvalidVoiceId(String),
    #[error("Failed to write WAV file: {0}")]
    WavWrite(String),
}

/// Contents of a model's `config.json`.
///
/// Unknown keys are kept in `extra` so a round trip loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub supported_languages: Vec<String>,
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ModelConfig {
    fn default_for(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            kind: Some("local".to_string()),
            supported_languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            sample_rate: Some(SAMPLE_RATE),
            extra: serde_json::Map::new(),
        }
    }
}

/// One registered model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    pub path: PathBuf,
    pub config: ModelConfig,
}

/// Result of [`PlaceholderModel::check`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStatus {
    pub exists: bool,
    pub message: String,
    pub model_path: PathBuf,
    pub reference_voices: Vec<String>,
    pub models: Vec<String>,
}

/// Loaded placeholder engine state.
pub struct PlaceholderModel {
    models_dir: PathBuf,
    models: BTreeMap<String, ModelEntry>,
    backend: WavBackend,
    rng: StdRng,
}

impl PlaceholderModel {
    /// Scan `models_dir` and build the model registry.
    ///
    /// Every subdirectory with a readable `config.json` becomes a model named
    /// after the directory. Broken configs are logged and skipped. The
    /// default models are added for any name still missing.
    pub fn load(
        models_dir: &Path,
        backend: WavBackend,
        seed: Option<u64>,
    ) -> Result<Self, PlaceholderError> {
        let mut models = BTreeMap::new();

        if models_dir.is_dir() {
            log::info!("Loading placeholder models from {}", models_dir.display());
            for entry in std::fs::read_dir(models_dir)? {
                let path = entry?.path();
                if !path.is_dir() {
                    continue;
                }
                let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string)
                else {
                    continue;
                };
                if name == REFERENCE_AUDIO_DIR {
                    continue;
                }

                let config_path = path.join("config.json");
                if !config_path.exists() {
                    log::warn!("config.json not found for model '{name}'");
                    continue;
                }
                match read_config(&config_path) {
                    Ok(config) => {
                        log::info!("Loaded model: {name}");
                        models.insert(name, ModelEntry { path, config });
                    }
                    Err(e) => log::error!("Error loading model '{name}': {e}"),
                }
            }
        } else {
            log::warn!(
                "Models directory {} does not exist, using default models only",
                models_dir.display()
            );
        }

        for name in DEFAULT_MODELS {
            if !models.contains_key(name) {
                log::info!("Added default model: {name}");
                models.insert(
                    name.to_string(),
                    ModelEntry {
                        path: models_dir.join(name),
                        config: ModelConfig::default_for(name),
                    },
                );
            }
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            models_dir: models_dir.to_path_buf(),
            models,
            backend,
            rng,
        })
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn backend(&self) -> WavBackend {
        self.backend
    }

    /// Registered model names in sorted order.
    pub fn list_models(&self) -> Vec<&str> {
        self.models.keys().map(|s| s.as_str()).collect()
    }

    pub fn model(&self, name: &str) -> Result<&ModelEntry, PlaceholderError> {
        self.models
            .get(name)
            .ok_or_else(|| PlaceholderError::ModelNotFound(name.to_string()))
    }

    /// Generate samples for `voice_id` with the model's own RNG.
    pub fn synthesize_voice(
        &mut self,
        voice_id: &str,
        duration_seconds: f64,
        profile: &SynthesisProfile,
    ) -> Vec<f32> {
        let voice = VoiceProfile::for_voice(voice_id);
        synth::synthesize(&voice, duration_seconds, SAMPLE_RATE, profile, &mut self.rng)
    }

    /// Directory holding per-voice reference audio.
    pub fn reference_audio_dir(&self) -> PathBuf {
        self.models_dir.join(REFERENCE_AUDIO_DIR)
    }

    /// Path of the reference audio file for a voice.
    pub fn reference_audio_path(&self, voice_id: &str) -> Result<PathBuf, PlaceholderError> {
        if !is_safe_file_stem(voice_id) {
            return Err(PlaceholderError::InvalidVoiceId(voice_id.to_string()));
        }
        Ok(self.reference_audio_dir().join(format!("{voice_id}.wav")))
    }

    /// Return the reference audio for a voice, generating it if missing.
    pub fn ensure_reference_audio(&mut self, voice_id: &str) -> Result<PathBuf, PlaceholderError> {
        let path = self.reference_audio_path(voice_id)?;
        if !path.exists() {
            log::warn!("Reference audio not found: {}", path.display());
            self.create_reference_audio(voice_id)?;
        }
        Ok(path)
    }

    /// Generate (or regenerate) the reference audio for a voice.
    pub fn create_reference_audio(&mut self, voice_id: &str) -> Result<PathBuf, PlaceholderError> {
        let path = self.reference_audio_path(voice_id)?;
        std::fs::create_dir_all(self.reference_audio_dir())?;

        let result = SynthesisResult {
            samples: self.synthesize_voice(
                voice_id,
                REFERENCE_DURATION_SECS,
                &SynthesisProfile::REFERENCE,
            ),
            sample_rate: SAMPLE_RATE,
        };
        result
            .write_wav_with(&path, self.backend)
            .map_err(|e| PlaceholderError::WavWrite(e.to_string()))?;

        log::info!("Created reference audio: {voice_id}.wav");
        Ok(path)
    }

    /// Regenerate reference audio for every voice in the table.
    pub fn prepare_reference_audio(&mut self) -> Result<Vec<PathBuf>, PlaceholderError> {
        VOICES
            .iter()
            .map(|voice| self.create_reference_audio(voice.id))
            .collect()
    }

    /// Voices whose reference audio is present on disk, in table order.
    pub fn reference_voices(&self) -> Vec<String> {
        VOICES
            .iter()
            .filter(|voice| {
                self.reference_audio_path(voice.id)
                    .map(|p| p.is_file())
                    .unwrap_or(false)
            })
            .map(|voice| voice.id.to_string())
            .collect()
    }

    /// Report what is available under the models directory.
    pub fn check(&self) -> ModelStatus {
        let reference_voices = self.reference_voices();
        let exists = self.models_dir.is_dir();
        let message = if !exists {
            "Models directory missing, default models only".to_string()
        } else if reference_voices.is_empty() {
            "Models directory found, but no reference audio generated yet".to_string()
        } else {
            format!(
                "Models directory found, reference audio for {} of {} voices",
                reference_voices.len(),
                VOICES.len()
            )
        };

        ModelStatus {
            exists,
            message,
            model_path: self.models_dir.clone(),
            reference_voices,
            models: self.list_models().into_iter().map(str::to_string).collect(),
        }
    }
}

fn read_config(path: &Path) -> Result<ModelConfig, PlaceholderError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// A voice id is usable as a file stem if it names a single path component.
fn is_safe_file_stem(voice_id: &str) -> bool {
    !voice_id.is_empty()
        && voice_id != "."
        && voice_id != ".."
        && !voice_id.contains(['/', '\\', '\0'])
}
