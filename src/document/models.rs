//! Data model for a single pipeline run
//!
//! Everything here is created and dropped within one run; nothing persists.

use serde::{Deserialize, Serialize};

/// Document type decided by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// General meeting record (minutes)
    GeneralMeeting,
    /// Research note (lab notes)
    ResearchNote,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeneralMeeting => "general_meeting",
            Self::ResearchNote => "research_note",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "general_meeting" => Some(Self::GeneralMeeting),
            "research_note" => Some(Self::ResearchNote),
            _ => None,
        }
    }

    /// Human-readable label used in rendered documents
    pub fn label(&self) -> &'static str {
        match self {
            Self::GeneralMeeting => "Meeting Minutes",
            Self::ResearchNote => "Research Note",
        }
    }
}

/// Caller-supplied meeting details, immutable once a run begins
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingMetadata {
    /// Meeting or session title
    pub title: String,

    /// Date/time as entered by the caller (free-form)
    pub datetime: String,

    /// Where the meeting took place
    pub location: String,

    /// Attendee names
    pub attendees: Vec<String>,

    /// Who ran the meeting
    pub facilitator: String,

    /// Who took notes
    pub note_taker: String,
}

/// A segment of transcribed speech
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Transcribed text
    pub text: String,

    /// Start time in seconds, when the engine reports timestamps
    pub start_time: Option<f64>,

    /// End time in seconds
    pub end_time: Option<f64>,
}

impl TranscriptSegment {
    pub fn new(text: String) -> Self {
        Self {
            text,
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_times(text: String, start_time: f64, end_time: f64) -> Self {
        Self {
            text,
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }
}

/// Ordered transcript for one recording
///
/// Zero segments means no decodable speech was found; that is a valid
/// transcript, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Concatenate all segments into the full plain-text transcript.
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        for segment in &self.segments {
            let trimmed = segment.text.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(trimmed);
        }
        text
    }
}

/// One action item extracted from the meeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    /// What needs to be done
    pub description: String,

    /// Who owns it, when stated
    pub owner: Option<String>,

    /// Due date (ISO YYYY-MM-DD), when stated
    pub due: Option<String>,
}

/// Structured summary produced by the summarizer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredSummary {
    /// Key discussion points, in order
    pub key_points: Vec<String>,

    /// Decisions reached
    pub decisions: Vec<String>,

    /// Action items with optional owner/due date
    pub action_items: Vec<ActionItem>,
}

impl StructuredSummary {
    pub fn is_empty(&self) -> bool {
        self.key_points.is_empty() && self.decisions.is_empty() && self.action_items.is_empty()
    }
}

/// Markdown document bound to the template selected by the classification
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Final Markdown text with every placeholder filled
    pub markdown: String,

    /// Classification that selected the template
    pub classification: Classification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_text_concatenates_segments_in_order() {
        let transcript = Transcript::new(vec![
            TranscriptSegment::with_times("First point.".to_string(), 0.0, 2.0),
            TranscriptSegment::new("  Second point.  ".to_string()),
        ]);
        assert_eq!(transcript.full_text(), "First point.\nSecond point.");
    }

    #[test]
    fn full_text_skips_blank_segments() {
        let transcript = Transcript::new(vec![
            TranscriptSegment::new("   ".to_string()),
            TranscriptSegment::new("Spoken words".to_string()),
        ]);
        assert_eq!(transcript.full_text(), "Spoken words");
    }

    #[test]
    fn classification_round_trips_as_str() {
        for c in [Classification::GeneralMeeting, Classification::ResearchNote] {
            assert_eq!(Classification::from_str(c.as_str()), Some(c));
        }
        assert_eq!(Classification::from_str("invoice"), None);
    }
}
