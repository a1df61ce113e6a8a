//! End-to-end pipeline tests with mock service adapters
//!
//! The external transcription/summarization services are replaced by mock
//! trait implementations; export uses the builtin renderer so the whole
//! pipeline runs offline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use notesmith::config::Settings;
use notesmith::document::{
    ActionItem, Classification, MeetingMetadata, StructuredSummary, Transcript, TranscriptSegment,
};
use notesmith::export::{Exporter, PdfEngineKind};
use notesmith::pipeline::{Pipeline, PipelineStage, StageTimeouts};
use notesmith::summarize::Summarizer;
use notesmith::transcribe::{AudioInput, Transcriber};
use notesmith::NotesmithError;

/// Mock transcriber returning a fixed transcript
struct MockTranscriber {
    text: Option<String>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockTranscriber {
    fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn empty() -> Self {
        Self {
            text: None,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing() -> Self {
        Self {
            text: None,
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &AudioInput) -> notesmith::Result<Transcript> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotesmithError::Transcription(
                "mock service unavailable".to_string(),
            ));
        }
        Ok(match &self.text {
            Some(text) => Transcript::new(vec![TranscriptSegment::new(text.clone())]),
            None => Transcript::default(),
        })
    }
}

/// Mock summarizer echoing a fixed summary, honoring the empty-transcript rule
struct MockSummarizer {
    summary: StructuredSummary,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockSummarizer {
    fn returning(summary: StructuredSummary) -> Self {
        Self {
            summary,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn empty() -> Self {
        Self::returning(StructuredSummary::default())
    }

    fn failing() -> Self {
        Self {
            summary: StructuredSummary::default(),
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(
        &self,
        transcript: &Transcript,
        _metadata: &MeetingMetadata,
    ) -> notesmith::Result<StructuredSummary> {
        if transcript.is_empty() {
            return Ok(StructuredSummary::default());
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotesmithError::Summarization(
                "mock service unavailable".to_string(),
            ));
        }
        Ok(self.summary.clone())
    }
}

fn builtin_exporter() -> Exporter {
    let mut settings = Settings::default();
    settings.export.engine = "builtin".to_string();
    Exporter::from_settings(&settings).unwrap()
}

fn pipeline(transcriber: MockTranscriber, summarizer: MockSummarizer) -> Pipeline {
    Pipeline::new(
        Box::new(transcriber),
        Box::new(summarizer),
        notesmith::document::TemplateRegistry::with_defaults(),
        builtin_exporter(),
        StageTimeouts::default(),
    )
}

fn metadata() -> MeetingMetadata {
    MeetingMetadata {
        title: "Team sync".to_string(),
        datetime: "2025-09-22 10:00".to_string(),
        location: "Room 2F".to_string(),
        attendees: vec!["Alice".to_string(), "Bob".to_string()],
        facilitator: "Alice".to_string(),
        note_taker: "Bob".to_string(),
    }
}

#[tokio::test]
async fn meeting_vocabulary_produces_general_meeting_document() {
    let transcriber = MockTranscriber::returning(
        "First item on the agenda. Action item for Alice: send the report. \
         The next meeting is on Thursday.",
    );
    let summarizer = MockSummarizer::returning(StructuredSummary {
        key_points: vec!["Agenda reviewed".to_string()],
        decisions: vec!["Meet again Thursday".to_string()],
        action_items: vec![ActionItem {
            description: "Send the report".to_string(),
            owner: Some("Alice".to_string()),
            due: None,
        }],
    });

    let artifacts = pipeline(transcriber, summarizer)
        .run(vec![1, 2, 3], "mp3", &metadata())
        .await
        .unwrap();

    assert_eq!(artifacts.classification, Classification::GeneralMeeting);
    assert!(artifacts.markdown.contains("# Team sync"));
    assert!(artifacts.markdown.contains("## Action Items"));
    assert!(artifacts.export.pdf.starts_with(b"%PDF-1.4"));
    assert_eq!(artifacts.export.engine, PdfEngineKind::Builtin);
}

#[tokio::test]
async fn research_vocabulary_produces_research_note_document() {
    let transcriber = MockTranscriber::returning(
        "Our hypothesis holds with sample size n=30. IRB approval came through \
         and the data collection protocol starts Monday.",
    );
    let summarizer = MockSummarizer::returning(StructuredSummary {
        key_points: vec!["Hypothesis supported by pilot data".to_string()],
        decisions: vec!["Begin data collection".to_string()],
        action_items: vec![],
    });

    let artifacts = pipeline(transcriber, summarizer)
        .run(vec![1, 2, 3], "wav", &metadata())
        .await
        .unwrap();

    assert_eq!(artifacts.classification, Classification::ResearchNote);
    assert!(artifacts.markdown.contains("# Research Note: Team sync"));
    assert!(artifacts.markdown.contains("## Key Observations"));
}

#[tokio::test]
async fn equal_signal_counts_default_to_general_meeting() {
    // One research term, one meeting term.
    let transcriber = MockTranscriber::returning("The hypothesis is on the agenda.");
    let summarizer = MockSummarizer::empty();

    let artifacts = pipeline(transcriber, summarizer)
        .run(vec![1], "ogg", &metadata())
        .await
        .unwrap();

    assert_eq!(artifacts.classification, Classification::GeneralMeeting);
}

#[tokio::test]
async fn unsupported_format_fails_before_any_service_call() {
    let transcriber = MockTranscriber::returning("irrelevant");
    let transcriber_calls = transcriber.calls.clone();
    let summarizer = MockSummarizer::empty();
    let summarizer_calls = summarizer.calls.clone();

    let err = pipeline(transcriber, summarizer)
        .run(vec![1], "aiff", &metadata())
        .await
        .expect_err("aiff must be rejected");

    assert_eq!(err.stage, PipelineStage::Received);
    assert!(matches!(err.source, NotesmithError::UnsupportedFormat(_)));
    assert_eq!(transcriber_calls.load(Ordering::SeqCst), 0);
    assert_eq!(summarizer_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_transcript_still_produces_complete_document() {
    let transcriber = MockTranscriber::empty();
    let summarizer = MockSummarizer::failing();
    let summarizer_calls = summarizer.calls.clone();

    let artifacts = pipeline(transcriber, summarizer)
        .run(vec![1], "m4a", &metadata())
        .await
        .unwrap();

    // The summarizer service is never invoked for silent audio, and every
    // list section still renders its explicit empty marker.
    assert_eq!(summarizer_calls.load(Ordering::SeqCst), 0);
    assert_eq!(artifacts.classification, Classification::GeneralMeeting);
    assert_eq!(artifacts.markdown.matches("_None recorded._").count(), 3);
    assert!(artifacts.export.pdf.starts_with(b"%PDF-1.4"));
}

#[tokio::test]
async fn transcription_failure_reports_transcribing_stage() {
    let err = pipeline(MockTranscriber::failing(), MockSummarizer::empty())
        .run(vec![1], "mp3", &metadata())
        .await
        .expect_err("expected transcription failure");

    assert_eq!(err.stage, PipelineStage::Transcribing);
    assert!(matches!(err.source, NotesmithError::Transcription(_)));
    assert!(err.to_string().contains("transcribing stage failed"));
}

#[tokio::test]
async fn summarization_failure_reports_summarizing_stage() {
    let err = pipeline(
        MockTranscriber::returning("plenty of speech"),
        MockSummarizer::failing(),
    )
    .run(vec![1], "mp3", &metadata())
    .await
    .expect_err("expected summarization failure");

    assert_eq!(err.stage, PipelineStage::Summarizing);
    assert!(matches!(err.source, NotesmithError::Summarization(_)));
}

#[tokio::test]
async fn missing_template_reports_rendering_stage() {
    let pipeline = Pipeline::new(
        Box::new(MockTranscriber::returning("agenda minutes")),
        Box::new(MockSummarizer::empty()),
        notesmith::document::TemplateRegistry::empty(),
        builtin_exporter(),
        StageTimeouts::default(),
    );

    let err = pipeline
        .run(vec![1], "mp3", &metadata())
        .await
        .expect_err("expected missing template failure");

    assert_eq!(err.stage, PipelineStage::Rendering);
    assert!(matches!(err.source, NotesmithError::TemplateNotFound(_)));
}

/// Slow mock used for the timeout test
struct SlowTranscriber;

#[async_trait]
impl Transcriber for SlowTranscriber {
    async fn transcribe(&self, _audio: &AudioInput) -> notesmith::Result<Transcript> {
        tokio::time::sleep(std::time::Duration::from_secs(600)).await;
        Ok(Transcript::default())
    }
}

#[tokio::test(start_paused = true)]
async fn stage_timeout_is_treated_as_a_service_error() {
    let pipeline = Pipeline::new(
        Box::new(SlowTranscriber),
        Box::new(MockSummarizer::empty()),
        notesmith::document::TemplateRegistry::with_defaults(),
        builtin_exporter(),
        StageTimeouts {
            transcribe: std::time::Duration::from_secs(5),
            summarize: std::time::Duration::from_secs(5),
        },
    );

    let err = pipeline
        .run(vec![1], "mp3", &metadata())
        .await
        .expect_err("expected timeout");

    assert_eq!(err.stage, PipelineStage::Transcribing);
    assert!(matches!(err.source, NotesmithError::Transcription(_)));
    assert!(err.source.to_string().contains("Timed out"));
}

#[tokio::test]
async fn classification_is_stable_across_identical_runs() {
    let text = "hypothesis protocol assay discussion";
    let first = pipeline(MockTranscriber::returning(text), MockSummarizer::empty())
        .run(vec![1], "mp3", &metadata())
        .await
        .unwrap();
    let second = pipeline(MockTranscriber::returning(text), MockSummarizer::empty())
        .run(vec![1], "mp3", &metadata())
        .await
        .unwrap();

    assert_eq!(first.classification, second.classification);
    assert_eq!(first.markdown, second.markdown);
}
