//! Whisper transcription backend.
//!
//! The whisper context is expensive to build, so it is created once per
//! process and kept for the lifetime of the process; exit reclaims it.
//! Inference is CPU-heavy and runs under `spawn_blocking`.

use std::path::Path;
use std::sync::OnceLock;

use tracing::info;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::config;

use super::MediaError;

/// Process-wide whisper context (stores Result to handle load errors)
static WHISPER: OnceLock<Result<WhisperContext, String>> = OnceLock::new();

/// Get the shared whisper context, loading the model on first use
fn whisper_context() -> Result<&'static WhisperContext, MediaError> {
    let result = WHISPER.get_or_init(|| {
        let path = config::whisper_model_path().map_err(|e| e.to_string())?;
        if !path.exists() {
            return Err(format!(
                "whisper model not found at {} (set whisper.model in config)",
                path.display()
            ));
        }

        let path_str = path
            .to_str()
            .ok_or_else(|| "whisper model path is not valid UTF-8".to_string())?;

        let ctx =
            WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
                .map_err(|e| format!("{e}"))?;
        info!(model = %path.display(), "whisper model loaded");
        Ok(ctx)
    });

    match result {
        Ok(ctx) => Ok(ctx),
        Err(e) => Err(MediaError::ModelLoad(e.clone())),
    }
}

/// Read a WAV file into mono f32 samples
fn read_samples(path: &Path) -> Result<Vec<f32>, MediaError> {
    let mut reader =
        hound::WavReader::open(path).map_err(|e| MediaError::AudioRead(e.to_string()))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
            .collect::<Result<_, _>>()
            .map_err(|e| MediaError::AudioRead(e.to_string()))?,
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| MediaError::AudioRead(e.to_string()))?,
    };

    Ok(samples)
}

/// Run whisper over prepared samples (blocking)
fn transcribe_samples(ctx: &WhisperContext, samples: &[f32]) -> Result<String, MediaError> {
    let mut state = ctx
        .create_state()
        .map_err(|e| MediaError::Transcribe(e.to_string()))?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    let cpus = std::thread::available_parallelism()
        .map(|n| n.get() as i32)
        .unwrap_or(4);
    params.set_n_threads(cpus);

    state
        .full(params, samples)
        .map_err(|e| MediaError::Transcribe(e.to_string()))?;

    // Segment texts joined in order with a single space separator
    let mut text = String::new();
    for segment in state.as_iter() {
        text.push_str(format!("{segment}").trim());
        text.push(' ');
    }

    Ok(text.trim().to_string())
}

/// Transcribe a 16 kHz mono WAV file to plain text.
///
/// The whole pipeline is blocking work: hound file I/O, the first-use
/// model load, and inference all run inside `spawn_blocking`. An empty
/// result means whisper produced no segments; that is not an error here.
pub async fn transcribe(wav_path: &Path) -> Result<String, MediaError> {
    let path = wav_path.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let samples = read_samples(&path)?;
        let ctx = whisper_context()?;
        transcribe_samples(ctx, &samples)
    })
    .await
    .map_err(|e| MediaError::Transcribe(format!("transcription task panicked: {e}")))?
}
