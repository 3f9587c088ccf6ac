use std::path::Path;

use placeholder_tts::engines::placeholder::synth::{self, SAMPLE_RATE};
use placeholder_tts::engines::placeholder::{
    PlaceholderEngine, PlaceholderModelParams, SynthesisProfile, VoiceProfile,
};
use placeholder_tts::{wav, SynthesisEngine, SynthesisResult, WavBackend};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn read_wav(path: &Path) -> (hound::WavSpec, Vec<i16>) {
    let reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    (spec, samples)
}

#[test]
fn p225_three_seconds_through_fallback_encoder() {
    let voice = VoiceProfile::for_voice("p225");
    let samples = synth::synthesize(
        &voice,
        3.0,
        SAMPLE_RATE,
        &SynthesisProfile::REFERENCE,
        &mut StdRng::seed_from_u64(11),
    );
    assert_eq!(samples.len(), 72_000);
    assert!(samples.iter().all(|s| (-0.9..=0.9).contains(s)));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("p225.wav");
    wav::write_pcm16_file(&path, &samples, SAMPLE_RATE).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 144_044);

    let (spec, decoded) = read_wav(&path);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(spec.sample_rate, 24_000);
    assert_eq!(decoded.len(), samples.len());
    for (&source, &read) in samples.iter().zip(&decoded) {
        let expected = (source as f64 * 32767.0).round() as i32;
        assert!((expected - read as i32).abs() <= 1);
        assert!((-29490..=29490).contains(&read));
    }
}

#[test]
fn fallback_round_trip_preserves_known_buffer() {
    let samples: Vec<f32> = (0..1000).map(|i| ((i as f32) / 500.0) - 1.0).collect();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ramp.wav");
    wav::write_pcm16_file(&path, &samples, 16_000).unwrap();

    let (spec, decoded) = read_wav(&path);
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(decoded.len(), 1000);
    for (&source, &read) in samples.iter().zip(&decoded) {
        assert!((wav::quantize(source) as i32 - read as i32).abs() <= 1);
    }
}

#[test]
fn both_backends_decode_to_the_same_samples() {
    let result = SynthesisResult {
        samples: synth::synthesize(
            &VoiceProfile::for_voice("p228"),
            2.0,
            SAMPLE_RATE,
            &SynthesisProfile::SPEECH,
            &mut StdRng::seed_from_u64(5),
        ),
        sample_rate: SAMPLE_RATE,
    };
    let dir = tempfile::tempdir().unwrap();
    let hound_path = dir.path().join("hound.wav");
    let fallback_path = dir.path().join("fallback.wav");
    result.write_wav_with(&hound_path, WavBackend::Hound).unwrap();
    result
        .write_wav_with(&fallback_path, WavBackend::Fallback)
        .unwrap();

    let (hound_spec, hound_samples) = read_wav(&hound_path);
    let (fallback_spec, fallback_samples) = read_wav(&fallback_path);
    assert_eq!(hound_spec, fallback_spec);
    assert_eq!(hound_samples, fallback_samples);
}

#[test]
fn empty_text_request_is_clamped_to_floor() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = PlaceholderEngine::with_backend(WavBackend::Fallback);
    engine
        .load_model_with_params(dir.path(), PlaceholderModelParams::default())
        .unwrap();

    let result = engine.synthesize("", None).unwrap();
    assert_eq!(result.samples.len(), 48_000);
    assert!((result.duration_secs() - 2.0).abs() < 1e-12);
}

#[test]
fn reference_audio_is_readable_by_a_standard_decoder() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = PlaceholderEngine::new();
    engine
        .load_model_with_params(dir.path(), PlaceholderModelParams { seed: Some(9) })
        .unwrap();

    let path = engine.ensure_reference_audio("p229").unwrap();
    let (spec, decoded) = read_wav(&path);
    assert_eq!(spec.sample_rate, 24_000);
    assert_eq!(decoded.len(), 72_000);
    assert!(decoded.iter().all(|s| (-29490..=29490).contains(s)));
}
