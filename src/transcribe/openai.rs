use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::config::Settings;
use crate::document::{Transcript, TranscriptSegment};
use crate::transcribe::audio::AudioInput;
use crate::transcribe::client::Transcriber;
use crate::NotesmithError;

const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini-transcribe";

/// Speech-to-text adapter for the OpenAI transcription API.
///
/// Uploads the audio as multipart form data and requests `verbose_json` so
/// per-segment timestamps are available when the service reports them.
pub struct OpenAiTranscriber {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
    language: String,
}

impl OpenAiTranscriber {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.transcription.api_key.trim().to_string();
        if api_key.is_empty() {
            anyhow::bail!(
                "Transcription API key is missing. Set transcription.api_key in config or NOTESMITH_OPENAI_API_KEY."
            );
        }

        let model = if settings.transcription.model.trim().is_empty() {
            DEFAULT_OPENAI_MODEL.to_string()
        } else {
            settings.transcription.model.trim().to_string()
        };

        let endpoint = if settings.transcription.endpoint.trim().is_empty() {
            DEFAULT_OPENAI_ENDPOINT.to_string()
        } else {
            settings
                .transcription
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(
                    settings.transcription.timeout_secs,
                ))
                .build()
                .context("Failed to build transcription HTTP client")?,
            api_key,
            model,
            endpoint,
            language: settings.transcription.language.trim().to_string(),
        })
    }

    fn request_url(&self) -> String {
        format!("{}/audio/transcriptions", self.endpoint)
    }

    fn build_form(&self, audio: &AudioInput) -> crate::Result<Form> {
        let part = Part::bytes(audio.bytes.clone())
            .file_name(audio.upload_name())
            .mime_str(audio.format.mime_type())
            .map_err(|e| NotesmithError::Transcription(format!("Invalid upload part: {}", e)))?;

        let mut form = Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");

        if !self.language.is_empty() {
            form = form.text("language", self.language.clone());
        }

        Ok(form)
    }
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn transcribe(&self, audio: &AudioInput) -> crate::Result<Transcript> {
        let form = self.build_form(audio)?;

        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| NotesmithError::Transcription(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotesmithError::Transcription(format!(
                "Service returned {}: {}",
                status,
                body.trim()
            )));
        }

        let payload: TranscriptionResponse = response.json().await.map_err(|e| {
            NotesmithError::Transcription(format!("Failed to parse response: {}", e))
        })?;

        Ok(payload.into_transcript())
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    segments: Vec<TranscriptionResponseSegment>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponseSegment {
    #[serde(default)]
    text: String,
    start: Option<f64>,
    end: Option<f64>,
}

impl TranscriptionResponse {
    /// Map the service payload into the pipeline transcript type.
    ///
    /// Timed segments are preferred; a plain-text-only response becomes one
    /// untimed segment. No decodable speech yields an empty transcript.
    fn into_transcript(self) -> Transcript {
        let segments: Vec<TranscriptSegment> = self
            .segments
            .into_iter()
            .filter(|s| !s.text.trim().is_empty())
            .map(|s| TranscriptSegment {
                text: s.text.trim().to_string(),
                start_time: s.start,
                end_time: s.end,
            })
            .collect();

        if !segments.is_empty() {
            return Transcript::new(segments);
        }

        let text = self.text.trim();
        if text.is_empty() {
            Transcript::default()
        } else {
            Transcript::new(vec![TranscriptSegment::new(text.to_string())])
        }
    }
}
