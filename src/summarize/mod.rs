//! Summarization module for notesmith
//!
//! Wraps the external text-generation service behind a capability trait and
//! turns its output into a structured summary.

mod client;
mod gemini;
mod prompts;
mod response;

pub use client::{build_summarizer, Summarizer};
pub use gemini::GeminiSummarizer;
pub use response::parse_summary_response;
