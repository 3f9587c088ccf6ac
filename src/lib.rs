//! # placeholder-tts
//!
//! Synthetic, speech-shaped placeholder audio for TTS voices that have no
//! recorded reference sample.
//!
//! ## Features
//!
//! - **Placeholder engine**: harmonic-plus-formant waveforms per voice group
//! - **Synthesis profiles**: the reference-audio and per-request variants as named presets
//! - **Two WAV backends**: `hound` (default feature) or the built-in PCM16 encoder
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! placeholder-tts = "2026.10"
//! ```
//!
//! ```ignore
//! use std::path::PathBuf;
//! use placeholder_tts::{engines::placeholder::PlaceholderEngine, SynthesisEngine};
//!
//! let mut engine = PlaceholderEngine::new();
//! engine.load_model(&PathBuf::from("models/placeholder-tts"))?;
//!
//! let result = engine.synthesize("Hello, world!", None)?;
//! result.write_wav(&PathBuf::from("output.wav"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engines;
pub mod response;
pub mod wav;

use std::path::Path;

use serde::Serialize;

/// How WAV containers get written.
///
/// Detected once when an engine is constructed and passed down from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WavBackend {
    /// The `hound` crate is compiled in.
    Hound,
    /// Only the built-in PCM16 encoder in [`wav`] is available.
    Fallback,
}

impl WavBackend {
    /// Pick the best backend this build supports.
    pub fn detect() -> Self {
        if cfg!(feature = "hound") {
            WavBackend::Hound
        } else {
            WavBackend::Fallback
        }
    }
}

/// The result of a synthesis (text-to-speech) operation.
///
/// Contains raw f32 audio samples and the sample rate of the output audio.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Raw audio samples as f32 values, clipped to [-0.9, 0.9]
    pub samples: Vec<f32>,
    /// Sample rate of the audio (24000 for the placeholder engine)
    pub sample_rate: u32,
}

impl SynthesisResult {
    /// Render the audio as a complete 16-bit PCM mono WAV file in memory.
    pub fn to_wav_bytes(&self, backend: WavBackend) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        match backend {
            #[cfg(feature = "hound")]
            WavBackend::Hound => Ok(render_with_hound(&self.samples, self.sample_rate)?),
            #[cfg(not(feature = "hound"))]
            WavBackend::Hound => {
                log::warn!("hound backend requested but not compiled in, using fallback");
                Ok(wav::encode_pcm16(&self.samples, self.sample_rate))
            }
            WavBackend::Fallback => Ok(wav::encode_pcm16(&self.samples, self.sample_rate)),
        }
    }

    /// Write the audio to a 16-bit PCM WAV file with the given backend.
    ///
    /// The whole file is rendered first and written in one call.
    pub fn write_wav_with(
        &self,
        path: &Path,
        backend: WavBackend,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let bytes = self.to_wav_bytes(backend)?;
        std::fs::write(path, &bytes)?;
        log::info!(
            "Wrote {} samples ({} bytes, {:?}) to {}",
            self.samples.len(),
            bytes.len(),
            backend,
            path.display()
        );
        Ok(())
    }

    /// Write the audio to a 16-bit PCM WAV file using [`WavBackend::detect`].
    pub fn write_wav(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.write_wav_with(path, WavBackend::detect())
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(feature = "hound")]
fn render_with_hound(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = std::io::Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in samples {
            writer.write_sample(wav::quantize(sample))?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Common interface for text-to-speech synthesis engines.
///
/// This trait defines the standard operations that all synthesis engines must support.
/// Each engine may have different parameter types for model loading and inference configuration.
pub trait SynthesisEngine {
    /// Parameters for configuring inference behavior (voice, speed, etc.)
    type SynthesisParams;
    /// Parameters for configuring model loading (seed, etc.)
    type ModelParams: Default;

    /// Load a model from the specified path using default parameters.
    fn load_model(&mut self, model_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.load_model_with_params(model_path, Self::ModelParams::default())
    }

    /// Load a model from the specified path with custom parameters.
    ///
    /// This is the explicit one-time initialization step; synthesis fails
    /// until it has succeeded.
    fn load_model_with_params(
        &mut self,
        model_path: &Path,
        params: Self::ModelParams,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Unload the currently loaded model and free associated resources.
    fn unload_model(&mut self);

    /// Synthesize speech from the given text.
    fn synthesize(
        &mut self,
        text: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>>;

    /// Synthesize speech from the given text and write to a WAV file.
    ///
    /// Default implementation calls `synthesize()` then `SynthesisResult::write_wav()`.
    fn synthesize_to_file(
        &mut self,
        text: &str,
        wav_path: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.synthesize(text, params)?.write_wav(wav_path)
    }
}

#[cfg(test)]
mod tests {
    use super::{SynthesisResult, WavBackend};

    #[test]
    fn duration_is_sample_count_over_rate() {
        let result = SynthesisResult {
            samples: vec![0.0; 36_000],
            sample_rate: 24_000,
        };
        assert!((result.duration_secs() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn fallback_bytes_have_canonical_header_size() {
        let result = SynthesisResult {
            samples: vec![0.25; 100],
            sample_rate: 24_000,
        };
        let bytes = result.to_wav_bytes(WavBackend::Fallback).unwrap();
        assert_eq!(bytes.len(), 44 + 200);
    }

    #[cfg(feature = "hound")]
    #[test]
    fn hound_backend_produces_readable_pcm16() {
        let result = SynthesisResult {
            samples: vec![0.5, -0.5, 0.0],
            sample_rate: 24_000,
        };
        let bytes = result.to_wav_bytes(WavBackend::Hound).unwrap();
        let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_rate, 24_000);
        let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, vec![16384, -16384, 0]);
    }
}
