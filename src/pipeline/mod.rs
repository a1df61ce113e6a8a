//! Pipeline orchestration
//!
//! One submission runs the stages strictly forward: transcribe -> summarize
//! -> classify -> render -> export. There are no automatic retries; a failed
//! run is resubmitted by the caller as a fresh run. Each stage's output is
//! the exclusive input to the next, and a failure produces no partial
//! artifacts. Dropping the returned future cancels any in-flight service
//! call.

use std::time::{Duration, Instant};

use crate::classify::classify;
use crate::document::{
    render, Classification, MeetingMetadata, StructuredSummary, TemplateRegistry, Transcript,
};
use crate::export::{ExportArtifact, Exporter};
use crate::summarize::Summarizer;
use crate::transcribe::{AudioInput, Transcriber};
use crate::NotesmithError;

/// Stages of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Transcribing,
    Summarizing,
    Classifying,
    Rendering,
    Exporting,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Transcribing => "transcribing",
            Self::Summarizing => "summarizing",
            Self::Classifying => "classifying",
            Self::Rendering => "rendering",
            Self::Exporting => "exporting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

/// A failed run: the stage that failed plus the underlying error
#[derive(Debug)]
pub struct RunError {
    pub stage: PipelineStage,
    pub source: NotesmithError,
}

impl RunError {
    /// Record the transition into the terminal failed state.
    fn new(stage: PipelineStage, source: NotesmithError) -> Self {
        tracing::warn!(
            stage = stage.as_str(),
            state = PipelineStage::Failed.as_str(),
            error = %source,
            "Pipeline run failed"
        );
        Self { stage, source }
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} stage failed: {}", self.stage.as_str(), self.source)
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Everything a successful run produces
#[derive(Debug)]
pub struct RunArtifacts {
    pub classification: Classification,
    pub markdown: String,
    pub export: ExportArtifact,
}

/// Per-stage timeouts for the network-bound stages
#[derive(Debug, Clone, Copy)]
pub struct StageTimeouts {
    pub transcribe: Duration,
    pub summarize: Duration,
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self {
            transcribe: Duration::from_secs(180),
            summarize: Duration::from_secs(45),
        }
    }
}

/// Sequences the document pipeline over injected collaborators.
///
/// All shared state (adapters, registry, exporter) is supplied at
/// construction and read-only afterwards, so concurrent runs are
/// independent.
pub struct Pipeline {
    transcriber: Box<dyn Transcriber>,
    summarizer: Box<dyn Summarizer>,
    registry: TemplateRegistry,
    exporter: Exporter,
    timeouts: StageTimeouts,
}

impl Pipeline {
    pub fn new(
        transcriber: Box<dyn Transcriber>,
        summarizer: Box<dyn Summarizer>,
        registry: TemplateRegistry,
        exporter: Exporter,
        timeouts: StageTimeouts,
    ) -> Self {
        Self {
            transcriber,
            summarizer,
            registry,
            exporter,
            timeouts,
        }
    }

    /// Execute one run.
    ///
    /// The audio payload is validated before any external call; after
    /// transcription completes the raw bytes are never inspected again.
    pub async fn run(
        &self,
        audio_bytes: Vec<u8>,
        extension: &str,
        metadata: &MeetingMetadata,
    ) -> Result<RunArtifacts, RunError> {
        let run_id = uuid::Uuid::new_v4();
        let started = Instant::now();
        tracing::info!(%run_id, "Pipeline run received");

        let audio = AudioInput::new(audio_bytes, extension)
            .map_err(|e| RunError::new(PipelineStage::Received, e))?;

        let transcript = self.transcribe_stage(&audio, run_id).await?;
        drop(audio);

        let summary = self.summarize_stage(&transcript, metadata, run_id).await?;

        tracing::info!(%run_id, stage = PipelineStage::Classifying.as_str(), "Stage started");
        let classification = classify(&transcript, &summary, metadata);
        tracing::info!(%run_id, classification = classification.as_str(), "Classified");

        tracing::info!(%run_id, stage = PipelineStage::Rendering.as_str(), "Stage started");
        let document = render(&self.registry, classification, &summary, metadata)
            .map_err(|e| RunError::new(PipelineStage::Rendering, e))?;

        tracing::info!(%run_id, stage = PipelineStage::Exporting.as_str(), "Stage started");
        let export = self
            .exporter
            .export(&document)
            .await
            .map_err(|e| RunError::new(PipelineStage::Exporting, e))?;

        tracing::info!(
            %run_id,
            state = PipelineStage::Done.as_str(),
            engine = export.engine.as_str(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Pipeline run done"
        );

        Ok(RunArtifacts {
            classification: document.classification,
            markdown: document.markdown,
            export,
        })
    }

    async fn transcribe_stage(
        &self,
        audio: &AudioInput,
        run_id: uuid::Uuid,
    ) -> Result<Transcript, RunError> {
        tracing::info!(%run_id, stage = PipelineStage::Transcribing.as_str(), "Stage started");
        let stage_start = Instant::now();

        let transcript = tokio::time::timeout(
            self.timeouts.transcribe,
            self.transcriber.transcribe(audio),
        )
        .await
        .unwrap_or_else(|_| {
            Err(NotesmithError::Transcription(format!(
                "Timed out after {}s",
                self.timeouts.transcribe.as_secs()
            )))
        })
        .map_err(|e| RunError::new(PipelineStage::Transcribing, e))?;

        tracing::debug!(
            %run_id,
            segments = transcript.segments.len(),
            elapsed_ms = stage_start.elapsed().as_millis() as u64,
            "Transcription finished"
        );
        Ok(transcript)
    }

    async fn summarize_stage(
        &self,
        transcript: &Transcript,
        metadata: &MeetingMetadata,
        run_id: uuid::Uuid,
    ) -> Result<StructuredSummary, RunError> {
        tracing::info!(%run_id, stage = PipelineStage::Summarizing.as_str(), "Stage started");
        let stage_start = Instant::now();

        let summary = tokio::time::timeout(
            self.timeouts.summarize,
            self.summarizer.summarize(transcript, metadata),
        )
        .await
        .unwrap_or_else(|_| {
            Err(NotesmithError::Summarization(format!(
                "Timed out after {}s",
                self.timeouts.summarize.as_secs()
            )))
        })
        .map_err(|e| RunError::new(PipelineStage::Summarizing, e))?;

        tracing::debug!(
            %run_id,
            key_points = summary.key_points.len(),
            elapsed_ms = stage_start.elapsed().as_millis() as u64,
            "Summarization finished"
        );
        Ok(summary)
    }
}
