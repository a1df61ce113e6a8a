use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::document::{MeetingMetadata, StructuredSummary, Transcript};
use crate::summarize::gemini::GeminiSummarizer;

/// Capability trait for the external summarization model.
///
/// An empty transcript must produce an all-empty summary without calling the
/// service. Service failures surface as `NotesmithError::Summarization`.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        transcript: &Transcript,
        metadata: &MeetingMetadata,
    ) -> crate::Result<StructuredSummary>;
}

/// Build a summarizer from runtime settings.
pub fn build_summarizer(settings: &Settings) -> Result<Box<dyn Summarizer>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => Ok(Box::new(GeminiSummarizer::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn unsupported_provider_returns_error() {
        let mut settings = Settings::default();
        settings.llm.provider = "unknown".to_string();

        let err = match build_summarizer(&settings) {
            Ok(_) => panic!("expected summarizer creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Unsupported llm.provider"));
    }

    #[test]
    fn gemini_summarizer_requires_api_key() {
        let settings = Settings::default();

        let err = match build_summarizer(&settings) {
            Ok(_) => panic!("expected summarizer creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Gemini API key is missing"));
    }
}
