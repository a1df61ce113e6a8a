//! Document classification
//!
//! Decides whether a run produces a general meeting record or a research
//! note. Pure lexical scoring over the transcript, summary, and metadata:
//! given identical inputs the result is identical, and absence of signals
//! falls back to the general-meeting default rather than failing.

use crate::document::{Classification, MeetingMetadata, StructuredSummary, Transcript};

/// Vocabulary that signals a research discussion
const RESEARCH_SIGNALS: &[&str] = &[
    "hypothesis",
    "protocol",
    "sample size",
    "irb",
    "data collection",
    "assay",
    "experiment",
    "dataset",
];

/// Vocabulary that signals an ordinary meeting
const MEETING_SIGNALS: &[&str] = &[
    "agenda",
    "minutes",
    "action item",
    "next meeting",
    "attendees",
    "follow-up",
];

/// Classify the run content.
///
/// Research wins only when its signal score strictly exceeds the meeting
/// score; ties resolve to the general meeting record, the safer default.
pub fn classify(
    transcript: &Transcript,
    summary: &StructuredSummary,
    metadata: &MeetingMetadata,
) -> Classification {
    let haystack = build_haystack(transcript, summary, metadata);

    let research_score = signal_score(&haystack, RESEARCH_SIGNALS);
    let meeting_score = signal_score(&haystack, MEETING_SIGNALS);

    tracing::debug!(
        research_score,
        meeting_score,
        "Classification signal scores"
    );

    if research_score > meeting_score {
        Classification::ResearchNote
    } else {
        Classification::GeneralMeeting
    }
}

/// Lowercased concatenation of every text field the classifier may inspect.
fn build_haystack(
    transcript: &Transcript,
    summary: &StructuredSummary,
    metadata: &MeetingMetadata,
) -> String {
    let mut haystack = String::new();
    haystack.push_str(&transcript.full_text());
    haystack.push('\n');
    haystack.push_str(&metadata.title);
    for point in &summary.key_points {
        haystack.push('\n');
        haystack.push_str(point);
    }
    for decision in &summary.decisions {
        haystack.push('\n');
        haystack.push_str(decision);
    }
    for action in &summary.action_items {
        haystack.push('\n');
        haystack.push_str(&action.description);
    }
    haystack.to_lowercase()
}

/// Count non-overlapping occurrences of every signal term.
fn signal_score(haystack: &str, signals: &[&str]) -> usize {
    signals
        .iter()
        .map(|signal| haystack.matches(signal).count())
        .sum()
}
