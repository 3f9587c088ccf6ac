//! Placeholder text-to-speech engine.
//!
//! Generates speech-shaped stand-in audio for voices that have no recorded
//! reference: a stack of harmonics over a per-voice fundamental, four flat
//! formant tones, an exponential fade and a little Gaussian noise.
//!
//! # Models Directory Layout
//!
//! ```text
//! models/placeholder-tts/
//! ├── tts-1/config.json          # optional, defaults are registered if absent
//! ├── my-model/config.json       # any extra model directory with a config
//! └── reference_audio/
//!     ├── p225.wav               # generated on demand, 3 s, 24 kHz PCM16
//!     └── ...
//! ```
//!
//! # Voices
//!
//! | Voice | Name | Group | Base | Formants (Hz) |
//! |---|---|---|---|---|
//! | `p225`, `p227`, `p229` | Female Voice 1-3 | high | 220 Hz | 500, 1500, 2500, 3500 |
//! | `p226`, `p228`, `p230` | Male Voice 1-3 | low | 110 Hz | 400, 1200, 2200, 3200 |
//!
//! Any other voice id is synthesized in the low group.
//!
//! # Profiles
//!
//! Two sets of waveform constants are in use and deliberately kept apart:
//! [`SynthesisProfile::REFERENCE`] (7 harmonics, `i^0.8` roll-off, formants)
//! for reference audio files and [`SynthesisProfile::SPEECH`] (5 harmonics,
//! linear roll-off, formants, faster decay) for per-request output.
//!
//! # Examples
//!
//! ```rust,no_run
//! use placeholder_tts::{SynthesisEngine, engines::placeholder::{PlaceholderEngine, PlaceholderInferenceParams}};
//! use std::path::PathBuf;
//!
//! let mut engine = PlaceholderEngine::new();
//! engine.load_model(&PathBuf::from("models/placeholder-tts"))?;
//!
//! let params = PlaceholderInferenceParams {
//!     voice: "p226".to_string(),
//!     ..Default::default()
//! };
//!
//! engine.synthesize_to_file("Hello from a placeholder!", &PathBuf::from("out.wav"), Some(params))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engine;
pub mod model;
pub mod synth;
pub mod voices;

pub use engine::{PlaceholderEngine, PlaceholderInferenceParams, PlaceholderModelParams};
pub use model::{ModelStatus, PlaceholderError};
pub use synth::{SynthesisProfile, SynthesisProfileBuilder};
pub use voices::{VoiceGroup, VoiceInfo, VoiceProfile};
