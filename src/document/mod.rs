//! Document module for notesmith
//!
//! Data model for one pipeline run plus template lookup and Markdown binding.

mod binder;
mod models;
mod templates;

pub use binder::render;
pub use models::{
    ActionItem, Classification, MeetingMetadata, RenderedDocument, StructuredSummary, Transcript,
    TranscriptSegment,
};
pub use templates::{DocumentTemplate, TemplateRegistry};
