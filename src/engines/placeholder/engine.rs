use std::path::{Path, PathBuf};

use crate::{SynthesisEngine, SynthesisResult, WavBackend};

use super::model::{ModelStatus, PlaceholderError, PlaceholderModel};
use super::synth::{duration_for_text, SynthesisProfile, SAMPLE_RATE};
use super::voices::{VoiceInfo, DEFAULT_VOICE, VOICES};

/// Parameters for configuring placeholder model loading.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderModelParams {
    /// Seed for the noise term. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

/// Parameters for configuring a placeholder synthesis request.
#[derive(Debug, Clone)]
pub struct PlaceholderInferenceParams {
    /// Voice id (e.g. `"p225"`). Unknown ids use the low-pitched group.
    pub voice: String,
    /// Registered model name (e.g. `"tts-1"`).
    pub model: String,
    /// Passed through for logging only.
    pub language: String,
    /// Passed through for logging only.
    pub speed: f32,
    /// Waveform constants for this request.
    pub profile: SynthesisProfile,
}

impl Default for PlaceholderInferenceParams {
    fn default() -> Self {
        Self {
            voice: DEFAULT_VOICE.to_string(),
            model: "tts-1".to_string(),
            language: "en".to_string(),
            speed: 1.0,
            profile: SynthesisProfile::SPEECH,
        }
    }
}

/// Placeholder text-to-speech engine.
///
/// Produces a synthetic harmonic waveform whose length follows the input
/// text. Nothing is actually spoken; the output stands in for a real voice
/// in pipelines that need audio of a plausible shape.
///
/// ```rust,no_run
/// use placeholder_tts::{SynthesisEngine, engines::placeholder::PlaceholderEngine};
/// use std::path::PathBuf;
///
/// let mut engine = PlaceholderEngine::new();
/// engine.load_model(&PathBuf::from("models/placeholder-tts"))?;
/// let result = engine.synthesize("Hello, world!", None)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PlaceholderEngine {
    model: Option<PlaceholderModel>,
    model_path: Option<PathBuf>,
    backend: WavBackend,
}

impl Default for PlaceholderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderEngine {
    /// Create a new engine using the best WAV backend this build supports.
    pub fn new() -> Self {
        Self::with_backend(WavBackend::detect())
    }

    /// Create a new engine with an explicit WAV backend.
    pub fn with_backend(backend: WavBackend) -> Self {
        log::debug!("Placeholder engine using {backend:?} WAV backend");
        Self {
            model: None,
            model_path: None,
            backend,
        }
    }

    pub fn backend(&self) -> WavBackend {
        self.backend
    }

    /// Models directory of the loaded model, if any.
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    /// The fixed voice table. Available without loading a model.
    pub fn list_voices(&self) -> &'static [VoiceInfo] {
        &VOICES
    }

    /// List registered model names (requires model to be loaded).
    pub fn list_models(&self) -> Vec<&str> {
        self.model
            .as_ref()
            .map(|m| m.list_models())
            .unwrap_or_default()
    }

    /// Reference audio path for a voice, generated on first use.
    pub fn ensure_reference_audio(&mut self, voice_id: &str) -> Result<PathBuf, PlaceholderError> {
        self.loaded_mut()?.ensure_reference_audio(voice_id)
    }

    /// Regenerate reference audio for every table voice.
    pub fn prepare_reference_audio(&mut self) -> Result<Vec<PathBuf>, PlaceholderError> {
        self.loaded_mut()?.prepare_reference_audio()
    }

    pub fn check_model(&self) -> Result<ModelStatus, PlaceholderError> {
        self.model
            .as_ref()
            .map(|m| m.check())
            .ok_or(PlaceholderError::ModelNotLoaded)
    }

    fn loaded_mut(&mut self) -> Result<&mut PlaceholderModel, PlaceholderError> {
        self.model.as_mut().ok_or(PlaceholderError::ModelNotLoaded)
    }
}

impl Drop for PlaceholderEngine {
    fn drop(&mut self) {
        self.unload_model();
    }
}

impl SynthesisEngine for PlaceholderEngine {
    type SynthesisParams = PlaceholderInferenceParams;
    type ModelParams = PlaceholderModelParams;

    fn load_model_with_params(
        &mut self,
        model_path: &Path,
        params: Self::ModelParams,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let model = PlaceholderModel::load(model_path, self.backend, params.seed)?;
        log::info!("Placeholder models: {:?}", model.list_models());
        self.model = Some(model);
        self.model_path = Some(model_path.to_path_buf());
        Ok(())
    }

    fn unload_model(&mut self) {
        self.model = None;
        self.model_path = None;
    }

    fn synthesize(
        &mut self,
        text: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>> {
        let model = self.loaded_mut()?;

        let p = params.unwrap_or_default();
        model.model(&p.model)?;

        let duration = duration_for_text(text);
        log::debug!(
            "Synthesizing {} chars: voice={}, model={}, language={}, speed={}, duration={duration:.2}s",
            text.chars().count(),
            p.voice,
            p.model,
            p.language,
            p.speed
        );

        let samples = model.synthesize_voice(&p.voice, duration, &p.profile);
        Ok(SynthesisResult {
            samples,
            sample_rate: SAMPLE_RATE,
        })
    }

    fn synthesize_to_file(
        &mut self,
        text: &str,
        wav_path: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let backend = self.backend;
        self.synthesize(text, params)?.write_wav_with(wav_path, backend)
    }
}
