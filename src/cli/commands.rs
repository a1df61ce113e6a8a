//! CLI command implementations

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::cli::args::{ConfigCommand, RunArgs};
use crate::config::Settings;
use crate::document::{MeetingMetadata, TemplateRegistry};
use crate::export::Exporter;
use crate::pipeline::{Pipeline, StageTimeouts};
use crate::summarize::build_summarizer;
use crate::transcribe::build_transcriber;

/// Run the full document pipeline over one recording.
pub async fn run_pipeline(settings: &Settings, args: RunArgs) -> Result<()> {
    // Credentials are a startup concern; fail before touching the audio.
    settings.validate()?;

    let audio_bytes = std::fs::read(&args.audio)
        .with_context(|| format!("Failed to read audio file: {}", args.audio.display()))?;
    let extension = args
        .audio
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string();

    let metadata = build_metadata(&args);

    let transcriber = build_transcriber(settings)?;
    let summarizer = build_summarizer(settings)?;
    let exporter = Exporter::from_settings(settings)?;
    let registry = TemplateRegistry::with_defaults();
    let timeouts = StageTimeouts {
        transcribe: std::time::Duration::from_secs(settings.transcription.timeout_secs),
        summarize: std::time::Duration::from_secs(settings.llm.timeout_secs),
    };

    let pipeline = Pipeline::new(transcriber, summarizer, registry, exporter, timeouts);

    let artifacts = pipeline
        .run(audio_bytes, &extension, &metadata)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let out_dir = args
        .output
        .unwrap_or_else(|| settings.general.output_dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let base = output_basename(&metadata.title);
    let md_path = out_dir.join(format!("{}.md", base));
    let pdf_path = out_dir.join(format!("{}.pdf", base));

    std::fs::write(&md_path, &artifacts.markdown)
        .with_context(|| format!("Failed to write {}", md_path.display()))?;
    std::fs::write(&pdf_path, &artifacts.export.pdf)
        .with_context(|| format!("Failed to write {}", pdf_path.display()))?;

    println!("Document type: {}", artifacts.classification.label());
    println!("PDF engine: {}", artifacts.export.engine.as_str());
    println!("Markdown: {}", md_path.display());
    println!("PDF: {}", pdf_path.display());

    Ok(())
}

fn build_metadata(args: &RunArgs) -> MeetingMetadata {
    let title = args
        .title
        .clone()
        .unwrap_or_else(|| format!("Meeting {}", Local::now().format("%Y-%m-%d %H:%M")));
    let datetime = args
        .date
        .clone()
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d %H:%M").to_string());

    MeetingMetadata {
        title,
        datetime,
        location: args.location.clone().unwrap_or_default(),
        attendees: args.attendees.clone(),
        facilitator: args.facilitator.clone().unwrap_or_default(),
        note_taker: args.note_taker.clone().unwrap_or_default(),
    }
}

/// File-safe ASCII basename derived from the title plus a timestamp.
fn output_basename(title: &str) -> String {
    let slug: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let slug = slug.trim_matches('_').to_string();
    let slug = if slug.is_empty() {
        "note".to_string()
    } else {
        slug.chars().take(80).collect()
    };

    format!("{}_{}", slug, Local::now().format("%Y%m%d_%H%M%S"))
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: &'static str,
    detail: &'static str,
}

#[derive(Serialize)]
struct DoctorReport {
    transcription_provider: String,
    llm_provider: String,
    export_engine: String,
    checks: Vec<DoctorCheck>,
    notes: Vec<String>,
}

/// Run diagnostic checks to help troubleshoot local setup issues.
pub async fn run_doctor(settings: &Settings, json: bool) -> Result<()> {
    let report = collect_doctor_report(settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("notesmith doctor");
    println!("transcription: {}", report.transcription_provider);
    println!("llm: {}", report.llm_provider);
    println!("export engine: {}", report.export_engine);
    println!();

    for check in &report.checks {
        println!("{:<22} {:<8} {}", check.name, check.status, check.detail);
    }

    if !report.notes.is_empty() {
        println!();
        for note in &report.notes {
            println!("{}", note);
        }
    }

    Ok(())
}

fn collect_doctor_report(settings: &Settings) -> DoctorReport {
    let transcription_key_ok = !settings.transcription.api_key.trim().is_empty();
    let llm_key_ok = !settings.llm.api_key.trim().is_empty();
    let pandoc_ok = which::which("pandoc").is_ok();

    let mut notes = Vec::new();
    if !transcription_key_ok {
        notes.push(
            "hint: set transcription.api_key in config or NOTESMITH_OPENAI_API_KEY.".to_string(),
        );
    }
    if !llm_key_ok {
        notes.push("hint: set llm.api_key in config or NOTESMITH_GEMINI_API_KEY.".to_string());
    }
    if !pandoc_ok && settings.export.engine == "pandoc" {
        notes.push(
            "warning: export.engine is 'pandoc' but the binary is missing; runs will fail at startup."
                .to_string(),
        );
    }
    if !pandoc_ok && settings.export.engine == "auto" {
        notes.push(
            "info: pandoc not found; exports will use the builtin plain-text renderer.".to_string(),
        );
    }

    DoctorReport {
        transcription_provider: settings.transcription.provider.clone(),
        llm_provider: settings.llm.provider.clone(),
        export_engine: settings.export.engine.clone(),
        checks: vec![
            DoctorCheck {
                name: "transcription api key",
                status: if transcription_key_ok { "ok" } else { "missing" },
                detail: "required for the speech-to-text service",
            },
            DoctorCheck {
                name: "llm api key",
                status: if llm_key_ok { "ok" } else { "missing" },
                detail: "required for the summarization service",
            },
            DoctorCheck {
                name: "pandoc",
                status: if pandoc_ok { "ok" } else { "missing" },
                detail: "optional high-fidelity PDF engine",
            },
        ],
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_basename_slugs_unsafe_characters() {
        let base = output_basename("Weekly sync: Q3 / planning");
        assert!(base.starts_with("Weekly_sync__Q3___planning_"));
        assert!(base.chars().all(|c| c.is_ascii_alphanumeric()
            || matches!(c, '.' | '_' | '-')));
    }

    #[test]
    fn output_basename_defaults_when_title_is_empty() {
        let base = output_basename("   ");
        assert!(base.starts_with("note_"));
    }

    #[test]
    fn doctor_report_flags_missing_keys() {
        let report = collect_doctor_report(&Settings::default());
        assert!(report
            .checks
            .iter()
            .any(|c| c.name == "transcription api key" && c.status == "missing"));
    }
}
