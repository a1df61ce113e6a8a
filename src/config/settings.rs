//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Speech-to-text service settings
    #[serde(default)]
    pub transcription: TranscriptionSettings,

    /// Summarization LLM settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// PDF export settings
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Directory where rendered documents are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionSettings {
    /// Transcription provider (openai)
    #[serde(default = "default_transcription_provider")]
    pub provider: String,

    /// API key for the transcription service
    #[serde(default)]
    pub api_key: String,

    /// Transcription model name
    #[serde(default = "default_transcription_model")]
    pub model: String,

    /// API endpoint (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// Language hint for transcription (empty = auto-detect)
    #[serde(default)]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_transcription_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (for cloud providers)
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (for local/custom providers)
    #[serde(default)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// PDF engine selection (auto, pandoc, builtin)
    #[serde(default = "default_export_engine")]
    pub engine: String,

    /// Maximum characters per line for the builtin renderer
    #[serde(default = "default_wrap_columns")]
    pub wrap_columns: usize,
}

// Default value functions

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_transcription_provider() -> String {
    "openai".to_string()
}

fn default_transcription_model() -> String {
    "gpt-4o-mini-transcribe".to_string()
}

fn default_transcription_timeout() -> u64 {
    180
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_llm_timeout() -> u64 {
    45
}

fn default_export_engine() -> String {
    "auto".to_string()
}

fn default_wrap_columns() -> usize {
    92
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: default_transcription_provider(),
            api_key: String::new(),
            model: default_transcription_model(),
            endpoint: String::new(),
            language: String::new(),
            timeout_secs: default_transcription_timeout(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            engine: default_export_engine(),
            wrap_columns: default_wrap_columns(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            transcription: TranscriptionSettings::default(),
            llm: LlmSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.transcription.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("NOTESMITH_OPENAI_API_KEY") {
                if !key.trim().is_empty() {
                    self.transcription.api_key = key;
                }
            }
        }
        if self.llm.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("NOTESMITH_GEMINI_API_KEY") {
                if !key.trim().is_empty() {
                    self.llm.api_key = key;
                }
            }
        }
    }

    /// Check that both service credentials are present.
    ///
    /// Missing credentials are a startup-time configuration error, never a
    /// per-run failure.
    pub fn validate(&self) -> crate::Result<()> {
        if self.transcription.api_key.trim().is_empty() {
            return Err(crate::NotesmithError::Config(
                "Transcription API key is missing. Set transcription.api_key in config or NOTESMITH_OPENAI_API_KEY.".to_string(),
            ));
        }
        if self.llm.api_key.trim().is_empty() {
            return Err(crate::NotesmithError::Config(
                "LLM API key is missing. Set llm.api_key in config or NOTESMITH_GEMINI_API_KEY."
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "notesmith", "notesmith")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_gemini_25_flash() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, "gemini-2.5-flash");
    }

    #[test]
    fn validate_rejects_missing_keys() {
        let settings = Settings::default();
        let err = settings.validate().expect_err("expected validation failure");
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn validate_accepts_both_keys() {
        let mut settings = Settings::default();
        settings.transcription.api_key = "sk-test".to_string();
        settings.llm.api_key = "gk-test".to_string();
        assert!(settings.validate().is_ok());
    }
}
