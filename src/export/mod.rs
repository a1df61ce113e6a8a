//! PDF export for rendered documents
//!
//! Prefers an external high-fidelity engine (pandoc) and falls back to a
//! built-in plain-text renderer that cannot fail for valid UTF-8 input.
//! Engine availability is resolved once at construction, never per run.

mod fallback;
mod pandoc;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::document::RenderedDocument;
use crate::{NotesmithError, Result};

pub use fallback::render_builtin_pdf;

/// Which renderer produced an export artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfEngineKind {
    /// External pandoc binary
    Pandoc,
    /// Built-in plain-text renderer
    Builtin,
}

impl PdfEngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pandoc => "pandoc",
            Self::Builtin => "builtin",
        }
    }
}

/// PDF bytes plus the engine flag
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub pdf: Vec<u8>,
    pub engine: PdfEngineKind,
}

/// Engine choice pinned at startup
#[derive(Debug, Clone)]
enum ResolvedEngine {
    /// Pandoc preferred, builtin as the guaranteed-success fallback
    PandocWithFallback(PathBuf),
    /// Pandoc pinned explicitly; failures surface as ExportFailed
    PandocOnly(PathBuf),
    /// Builtin only
    Builtin,
}

/// Markdown to PDF exporter
#[derive(Debug)]
pub struct Exporter {
    engine: ResolvedEngine,
    wrap_columns: usize,
}

impl Exporter {
    /// Resolve the engine from settings.
    ///
    /// `auto` probes PATH for pandoc once; `pandoc` pins the external engine
    /// and fails construction when the binary is absent; `builtin` skips the
    /// probe entirely.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let engine = match settings.export.engine.to_lowercase().as_str() {
            "auto" => match which::which("pandoc") {
                Ok(path) => {
                    tracing::info!("Using pandoc for PDF export: {}", path.display());
                    ResolvedEngine::PandocWithFallback(path)
                }
                Err(_) => {
                    tracing::info!("pandoc not found, using builtin PDF renderer");
                    ResolvedEngine::Builtin
                }
            },
            "pandoc" => {
                let path = which::which("pandoc").map_err(|_| {
                    NotesmithError::Config(
                        "export.engine is 'pandoc' but no pandoc binary is on PATH".to_string(),
                    )
                })?;
                ResolvedEngine::PandocOnly(path)
            }
            "builtin" => ResolvedEngine::Builtin,
            other => {
                return Err(NotesmithError::Config(format!(
                    "Unknown export.engine '{}'. Supported: auto, pandoc, builtin",
                    other
                )))
            }
        };

        Ok(Self {
            engine,
            wrap_columns: settings.export.wrap_columns.max(20),
        })
    }

    /// Convert a rendered document to PDF.
    ///
    /// With a fallback available this never returns `ExportFailed`; the
    /// builtin renderer is total for any valid Markdown text.
    pub async fn export(&self, document: &RenderedDocument) -> Result<ExportArtifact> {
        match &self.engine {
            ResolvedEngine::PandocWithFallback(path) => {
                match pandoc::render_pdf(path, &document.markdown).await {
                    Ok(pdf) => Ok(ExportArtifact {
                        pdf,
                        engine: PdfEngineKind::Pandoc,
                    }),
                    Err(e) => {
                        tracing::warn!("pandoc export failed, using builtin renderer: {}", e);
                        Ok(ExportArtifact {
                            pdf: render_builtin_pdf(&document.markdown, self.wrap_columns),
                            engine: PdfEngineKind::Builtin,
                        })
                    }
                }
            }
            ResolvedEngine::PandocOnly(path) => {
                let pdf = pandoc::render_pdf(path, &document.markdown)
                    .await
                    .map_err(|e| NotesmithError::ExportFailed(e.to_string()))?;
                Ok(ExportArtifact {
                    pdf,
                    engine: PdfEngineKind::Pandoc,
                })
            }
            ResolvedEngine::Builtin => Ok(ExportArtifact {
                pdf: render_builtin_pdf(&document.markdown, self.wrap_columns),
                engine: PdfEngineKind::Builtin,
            }),
        }
    }
}
