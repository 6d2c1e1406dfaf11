//! Media ingestion: ffmpeg decode + whisper transcription.
//!
//! Video and compressed audio are first decoded to mono 16 kHz PCM via an
//! ffmpeg subprocess; the resulting samples go to an in-process whisper
//! model loaded once per process.

pub mod decode;
pub mod transcriber;

use std::path::Path;

use thiserror::Error;

pub use decode::decode_to_wav;
pub use transcriber::transcribe;

/// Errors from the media pipeline
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Media file not found: {0}")]
    NotFound(String),

    #[error("ffmpeg failed: {0}")]
    Decode(String),

    #[error("Failed to load whisper model: {0}")]
    ModelLoad(String),

    #[error("Failed to read audio samples: {0}")]
    AudioRead(String),

    #[error("Transcription failed: {0}")]
    Transcribe(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// File extensions treated as already-decoded WAV audio
fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
}

/// Transcribe a media file (audio or video) to plain text.
///
/// Anything that is not already a WAV file goes through ffmpeg to mono
/// 16 kHz PCM first; decode failure is fatal for the operation and carries
/// ffmpeg's stderr text. An empty transcript is not an error — callers
/// treat it as "could not transcribe".
pub async fn transcribe_media(path: &Path) -> Result<String, MediaError> {
    if !path.exists() {
        return Err(MediaError::NotFound(path.display().to_string()));
    }

    let wav_path = if is_wav(path) {
        path.to_path_buf()
    } else {
        decode_to_wav(path).await?
    };

    transcribe(&wav_path).await
}
