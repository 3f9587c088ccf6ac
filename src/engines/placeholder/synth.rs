//! Harmonic-plus-formant placeholder waveform synthesis.

use std::f64::consts::TAU;

use derive_builder::Builder;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::voices::VoiceProfile;

/// Output sample rate of the placeholder engine.
pub const SAMPLE_RATE: u32 = 24000;

/// Shortest duration ever synthesized, in seconds.
pub const MIN_DURATION_SECS: f64 = 2.0;

/// Seconds of audio per input character when the duration comes from text.
pub const SECONDS_PER_CHAR: f64 = 0.1;

/// Duration of generated reference audio files, in seconds.
pub const REFERENCE_DURATION_SECS: f64 = 3.0;

/// Samples are hard-clipped to `[-CLIP_LEVEL, CLIP_LEVEL]`.
pub const CLIP_LEVEL: f64 = 0.9;

/// Constants that shape a placeholder waveform.
///
/// Harmonic `i` (1-based) gets amplitude `harmonic_gain / i^rolloff_exponent`.
/// Each formant is added at a flat `formant_gain`. The signal then decays as
/// `exp(-t / (duration * envelope_decay))` before Gaussian noise with standard
/// deviation `noise_std` is added.
///
/// Fields are public, so [`synthesize`] does not rely on the builder's
/// validation: a non-positive or non-finite decay disables the envelope and a
/// non-positive or non-finite noise level disables the noise.
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct SynthesisProfile {
    pub harmonic_count: u32,
    pub harmonic_gain: f64,
    pub rolloff_exponent: f64,
    pub formant_gain: f64,
    pub envelope_decay: f64,
    pub noise_std: f64,
}

impl SynthesisProfile {
    /// Seven harmonics with a gentle `i^0.8` roll-off, formants, slow decay.
    /// Used for generated reference audio.
    pub const REFERENCE: SynthesisProfile = SynthesisProfile {
        harmonic_count: 7,
        harmonic_gain: 0.4,
        rolloff_exponent: 0.8,
        formant_gain: 0.1,
        envelope_decay: 0.4,
        noise_std: 0.005,
    };

    /// Five harmonics with linear roll-off, formants, faster decay.
    /// Used for per-request placeholder speech from local models.
    pub const SPEECH: SynthesisProfile = SynthesisProfile {
        harmonic_count: 5,
        harmonic_gain: 0.3,
        rolloff_exponent: 1.0,
        formant_gain: 0.1,
        envelope_decay: 0.3,
        noise_std: 0.01,
    };

    /// Amplitude of harmonic `i` (1-based).
    pub fn harmonic_amplitude(&self, i: u32) -> f64 {
        self.harmonic_gain / (i as f64).powf(self.rolloff_exponent)
    }

    /// The same profile with the noise term removed.
    pub fn without_noise(self) -> Self {
        Self {
            noise_std: 0.0,
            ..self
        }
    }
}

impl Default for SynthesisProfile {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl SynthesisProfileBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(decay) = self.envelope_decay {
            if !(decay.is_finite() && decay > 0.0) {
                return Err(format!("envelope_decay must be positive, got {decay}"));
            }
        }
        if let Some(std) = self.noise_std {
            if !(std.is_finite() && std >= 0.0) {
                return Err(format!("noise_std must be non-negative, got {std}"));
            }
        }
        Ok(())
    }
}

/// Coerce a requested duration to something synthesizable.
///
/// Anything below the floor, and any non-finite value, becomes the floor.
pub fn clamp_duration(duration_seconds: f64) -> f64 {
    if duration_seconds.is_finite() {
        duration_seconds.max(MIN_DURATION_SECS)
    } else {
        MIN_DURATION_SECS
    }
}

/// Duration heuristic for a request text: 0.1 s per character, at least 2 s.
pub fn duration_for_text(text: &str) -> f64 {
    clamp_duration(text.chars().count() as f64 * SECONDS_PER_CHAR)
}

/// Number of samples produced for a (clamped) duration.
pub fn sample_count(sample_rate: u32, duration_seconds: f64) -> usize {
    (sample_rate as f64 * clamp_duration(duration_seconds)).round() as usize
}

/// Synthesize a placeholder waveform for one voice.
///
/// Returns exactly [`sample_count`] samples, all within `[-0.9, 0.9]`.
/// Everything except the noise term is a pure function of the arguments.
pub fn synthesize<R: Rng + ?Sized>(
    voice: &VoiceProfile,
    duration_seconds: f64,
    sample_rate: u32,
    profile: &SynthesisProfile,
    rng: &mut R,
) -> Vec<f32> {
    let duration = clamp_duration(duration_seconds);
    let n = sample_count(sample_rate, duration);
    let step = if n > 1 {
        duration / (n - 1) as f64
    } else {
        0.0
    };
    let decay_time = if profile.envelope_decay.is_finite() && profile.envelope_decay > 0.0 {
        Some(duration * profile.envelope_decay)
    } else {
        None
    };
    let noise = if profile.noise_std.is_finite() && profile.noise_std > 0.0 {
        Normal::new(0.0, profile.noise_std).ok()
    } else {
        None
    };

    let harmonics: Vec<(f64, f64)> = (1..=profile.harmonic_count)
        .map(|i| {
            (
                TAU * voice.base_frequency * i as f64,
                profile.harmonic_amplitude(i),
            )
        })
        .collect();
    let formants = voice.formant_frequencies.map(|f| TAU * f);

    let mut samples = Vec::with_capacity(n);
    for k in 0..n {
        let t = k as f64 * step;

        let mut value = 0.0;
        for &(omega, amplitude) in &harmonics {
            value += amplitude * (omega * t).sin();
        }
        for &omega in &formants {
            value += profile.formant_gain * (omega * t).sin();
        }

        if let Some(decay_time) = decay_time {
            value *= (-t / decay_time).exp();
        }

        if let Some(noise) = &noise {
            value += noise.sample(rng);
        }

        if value.is_nan() {
            value = 0.0;
        }
        samples.push(value.clamp(-CLIP_LEVEL, CLIP_LEVEL) as f32);
    }

    samples
}
