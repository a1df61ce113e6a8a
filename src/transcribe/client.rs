use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::document::Transcript;
use crate::transcribe::audio::AudioInput;
use crate::transcribe::openai::OpenAiTranscriber;

/// Capability trait for the external speech-to-text service.
///
/// Returns an empty transcript when the audio contains no decodable speech;
/// that case is not an error. Service failures are surfaced as
/// `NotesmithError::Transcription` and are not retried here.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &AudioInput) -> crate::Result<Transcript>;
}

/// Build a transcriber from runtime settings.
pub fn build_transcriber(settings: &Settings) -> Result<Box<dyn Transcriber>> {
    match settings.transcription.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiTranscriber::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported transcription.provider '{}'. Supported providers: openai",
            other
        ),
    }
}
