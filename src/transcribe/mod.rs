//! Transcription module for notesmith
//!
//! Wraps the external speech-to-text service behind a capability trait.

mod audio;
mod client;
mod openai;

pub use audio::{AudioFormat, AudioInput};
pub use client::{build_transcriber, Transcriber};
pub use openai::OpenAiTranscriber;
