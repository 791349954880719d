pub mod voice;

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::AppError;
use crate::upstream::{SpeechRequest, SpeechSynthesizer};

pub use voice::Voice;

pub const DEFAULT_SPEED: f32 = 1.0;
pub const MIN_SPEED: f32 = 0.25;
pub const MAX_SPEED: f32 = 4.0;
pub const MAX_TEXT_CHARS: usize = 4096;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioResult {
    /// Base64 of the synthesized audio file.
    pub audio_content: String,
}

pub struct AudioService {
    speech: Arc<dyn SpeechSynthesizer>,
}

impl AudioService {
    pub fn new(speech: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { speech }
    }

    pub async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        speed: Option<f32>,
    ) -> Result<AudioResult, AppError> {
        let request = build_request(text, voice, speed)?;
        tracing::info!(
            "Synthesizing {} chars with voice {} at {}x",
            request.text.chars().count(),
            request.voice,
            request.speed
        );

        let audio = self.speech.synthesize(&request).await?;

        let stored = tokio::task::spawn_blocking(move || round_trip_through_file(&audio))
            .await
            .map_err(|e| AppError::Internal(format!("audio task failed: {}", e)))??;

        Ok(AudioResult {
            audio_content: BASE64.encode(stored),
        })
    }
}

fn build_request(
    text: &str,
    voice: Option<&str>,
    speed: Option<f32>,
) -> Result<SpeechRequest, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text is required".into()));
    }

    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "text too long (max {} chars)",
            MAX_TEXT_CHARS
        )));
    }

    let voice = match voice {
        Some(v) => v.parse::<Voice>()?,
        None => Voice::default(),
    };

    let speed = speed.unwrap_or(DEFAULT_SPEED);
    if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(AppError::Validation(format!(
            "speed must be between {} and {}",
            MIN_SPEED, MAX_SPEED
        )));
    }

    Ok(SpeechRequest {
        text: text.to_string(),
        voice,
        speed,
    })
}

/// Write the audio to a request-scoped temp file and return what is on disk.
///
/// The file is removed when `file` drops, on every path out of this function.
fn round_trip_through_file(audio: &[u8]) -> Result<Vec<u8>, AppError> {
    round_trip_in(&std::env::temp_dir(), audio)
}

fn round_trip_in(dir: &Path, audio: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut file = tempfile::Builder::new()
        .prefix("speech-")
        .suffix(".mp3")
        .tempfile_in(dir)?;

    file.write_all(audio)?;
    file.flush()?;

    let mut stored = Vec::with_capacity(audio.len());
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut stored)?;

    Ok(stored)
}
