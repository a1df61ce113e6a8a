//! notesmith - Turn a meeting recording into classified minutes or lab notes
//!
//! One pipeline run: audio upload -> transcript -> structured summary ->
//! document classification -> Markdown rendering -> PDF export.

pub mod classify;
pub mod cli;
pub mod config;
pub mod document;
pub mod export;
pub mod pipeline;
pub mod summarize;
pub mod transcribe;

use thiserror::Error;

/// Main error type for notesmith
#[derive(Error, Debug)]
pub enum NotesmithError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Transcription service error: {0}")]
    Transcription(String),

    #[error("Summarization service error: {0}")]
    Summarization(String),

    #[error("No template registered for document type: {0}")]
    TemplateNotFound(String),

    #[error("PDF export failed: {0}")]
    ExportFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NotesmithError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "notesmith";
