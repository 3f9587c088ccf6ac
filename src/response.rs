//! JSON results handed back to the calling process.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use base64::Engine;
use serde::Serialize;

use crate::engines::placeholder::{ModelStatus, VoiceInfo};
use crate::{SynthesisResult, WavBackend};

/// Container tag reported for every synthesized file.
pub const AUDIO_FORMAT: &str = "wav";

/// Result of one synthesis request.
///
/// On success `audio`, `format`, `sample_rate` and `duration` are set; on
/// failure only `error` is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SynthesisResponse {
    /// Wrap the bytes of a written WAV file.
    pub fn success(wav_bytes: &[u8], result: &SynthesisResult) -> Self {
        Self {
            success: true,
            audio: Some(base64::engine::general_purpose::STANDARD.encode(wav_bytes)),
            format: Some(AUDIO_FORMAT.to_string()),
            sample_rate: Some(result.sample_rate),
            duration: Some(result.duration_secs()),
            error: None,
        }
    }

    pub fn failure(error: impl Display) -> Self {
        Self {
            success: false,
            audio: None,
            format: None,
            sample_rate: None,
            duration: None,
            error: Some(error.to_string()),
        }
    }

    /// Write `result` to `output` (or a fresh temporary file) and wrap the
    /// file's bytes. Any failure becomes a failure response.
    pub fn from_result(result: &SynthesisResult, backend: WavBackend, output: Option<&Path>) -> Self {
        match write_and_read_back(result, backend, output) {
            Ok(bytes) => Self::success(&bytes, result),
            Err(e) => {
                log::error!("Synthesis output failed: {e}");
                Self::failure(e)
            }
        }
    }
}

fn write_and_read_back(
    result: &SynthesisResult,
    backend: WavBackend,
    output: Option<&Path>,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            result.write_wav_with(path, backend)?;
            Ok(std::fs::read(path)?)
        }
        None => {
            // Unique per request; removed when `tmp` drops.
            let tmp = tempfile::Builder::new()
                .prefix("placeholder-tts-")
                .suffix(".wav")
                .tempfile()?;
            result.write_wav_with(tmp.path(), backend)?;
            Ok(std::fs::read(tmp.path())?)
        }
    }
}

/// Outcome of a command that has no payload beyond a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Display) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VoiceList {
    pub voices: &'static [VoiceInfo],
    pub model_path: PathBuf,
    pub backend: WavBackend,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelList {
    pub models: Vec<String>,
    pub backend: WavBackend,
}

/// `check-model` output; a status or the reason none could be produced.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CheckResponse {
    Status(ModelStatus),
    Failed { exists: bool, error: String },
}
