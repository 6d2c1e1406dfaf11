//! ffmpeg decode step.
//!
//! Converts any audio/video input to mono 16 kHz PCM WAV at a fixed
//! relative path. Single-slot by design: only one user action runs at a
//! time, so repeated invocations overwriting the same file is fine.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::MediaError;

/// Fixed output slot for the decoded waveform
pub const TEMP_AUDIO_PATH: &str = "temp_audio.wav";

/// Decode a media file to mono 16 kHz PCM s16 WAV.
///
/// Returns the path of the decoded file. A non-zero ffmpeg exit is fatal
/// for the current operation and surfaces the tool's stderr text.
pub async fn decode_to_wav(input: &Path) -> Result<PathBuf, MediaError> {
    let output_path = PathBuf::from(TEMP_AUDIO_PATH);

    debug!(input = %input.display(), output = %output_path.display(), "decoding media with ffmpeg");

    let output = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-f", "wav", "-acodec", "pcm_s16le", "-ac", "1", "-ar", "16000"])
        .arg(&output_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // ffmpeg front-loads banners; the useful message is at the end
        let tail = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("no error output")
            .to_string();
        return Err(MediaError::Decode(tail));
    }

    Ok(output_path)
}
