//! Command-line shim for the placeholder engine.
//!
//! Each invocation runs one command and prints a single JSON object on
//! stdout. Logs go to stderr and are filtered with `RUST_LOG`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use placeholder_tts::engines::placeholder::{
    PlaceholderEngine, PlaceholderInferenceParams, PlaceholderModelParams, SynthesisProfile,
};
use placeholder_tts::response::{
    CheckResponse, CommandResponse, ModelList, SynthesisResponse, VoiceList,
};
use placeholder_tts::SynthesisEngine;

/// Placeholder TTS - synthetic stand-in audio for voices without a reference
#[derive(Debug, Parser)]
#[command(name = "placeholder-tts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Models directory (model configs and reference audio)
    #[arg(
        long,
        global = true,
        env = "PLACEHOLDER_TTS_MODELS_DIR",
        default_value = "./models/placeholder-tts"
    )]
    models_dir: PathBuf,

    /// Seed for the noise term (default: random)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the available voices
    ListVoices,

    /// List the registered models
    ListModels,

    /// Synthesize placeholder audio for a text
    Synthesize {
        /// Text to synthesize; only its length is used
        text: String,

        /// Voice id
        #[arg(long, default_value = "p225")]
        voice: String,

        /// Model name
        #[arg(long, default_value = "tts-1")]
        model: String,

        /// Language code (passed through)
        #[arg(long, default_value = "en")]
        language: String,

        /// Speed multiplier (passed through)
        #[arg(long, default_value_t = 1.0)]
        speed: f32,

        /// Waveform profile
        #[arg(long, value_enum, default_value_t = ProfileArg::Speech)]
        profile: ProfileArg,

        /// Keep the WAV file at this path instead of a temporary file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report models directory and reference audio status
    CheckModel,

    /// Generate reference audio for every voice
    PrepareReferences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    /// 7 harmonics with formants, as used for reference audio
    Reference,
    /// 5 harmonics with linear roll-off and faster decay
    Speech,
}

impl From<ProfileArg> for SynthesisProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Reference => SynthesisProfile::REFERENCE,
            ProfileArg::Speech => SynthesisProfile::SPEECH,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let mut engine = PlaceholderEngine::new();

    if let Err(e) =
        engine.load_model_with_params(&cli.models_dir, PlaceholderModelParams { seed: cli.seed })
    {
        log::error!("Failed to load models from {}: {e}", cli.models_dir.display());
        print_json(&CommandResponse::failure(e));
        std::process::exit(1);
    }

    match cli.command {
        Commands::ListVoices => print_json(&VoiceList {
            voices: engine.list_voices(),
            model_path: cli.models_dir.clone(),
            backend: engine.backend(),
        }),
        Commands::ListModels => print_json(&ModelList {
            models: engine.list_models().into_iter().map(str::to_string).collect(),
            backend: engine.backend(),
        }),
        Commands::Synthesize {
            text,
            voice,
            model,
            language,
            speed,
            profile,
            output,
        } => {
            let params = PlaceholderInferenceParams {
                voice,
                model,
                language,
                speed,
                profile: profile.into(),
            };
            let response = match engine.synthesize(&text, Some(params)) {
                Ok(result) => {
                    SynthesisResponse::from_result(&result, engine.backend(), output.as_deref())
                }
                Err(e) => {
                    log::error!("Synthesis error: {e}");
                    SynthesisResponse::failure(e)
                }
            };
            print_json(&response);
        }
        Commands::CheckModel => {
            let response = match engine.check_model() {
                Ok(status) => CheckResponse::Status(status),
                Err(e) => CheckResponse::Failed {
                    exists: false,
                    error: e.to_string(),
                },
            };
            print_json(&response);
        }
        Commands::PrepareReferences => {
            let response = match engine.prepare_reference_audio() {
                Ok(paths) => CommandResponse::ok(format!(
                    "Created reference audio for {} voices",
                    paths.len()
                )),
                Err(e) => {
                    log::error!("Error preparing reference audio: {e}");
                    CommandResponse::failure(e)
                }
            };
            print_json(&response);
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize result: {e}");
            println!(r#"{{"success":false,"error":"failed to serialize result"}}"#);
        }
    }
}
