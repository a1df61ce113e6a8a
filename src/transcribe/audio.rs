//! Uploaded audio payload and the accepted format allow-list

use crate::{NotesmithError, Result};

/// Audio container/codec formats the transcription service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Flac,
    M4a,
    Mp3,
    Mp4,
    Mpeg,
    Mpga,
    Oga,
    Ogg,
    Wav,
    Webm,
}

impl AudioFormat {
    /// Parse a file extension, case-insensitively.
    ///
    /// Anything outside the allow-list is rejected before any external call
    /// is made.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.trim().trim_start_matches('.').to_lowercase().as_str() {
            "flac" => Ok(Self::Flac),
            "m4a" => Ok(Self::M4a),
            "mp3" => Ok(Self::Mp3),
            "mp4" => Ok(Self::Mp4),
            "mpeg" => Ok(Self::Mpeg),
            "mpga" => Ok(Self::Mpga),
            "oga" => Ok(Self::Oga),
            "ogg" => Ok(Self::Ogg),
            "wav" => Ok(Self::Wav),
            "webm" => Ok(Self::Webm),
            other => Err(NotesmithError::UnsupportedFormat(format!(
                "'{}' is not in the supported set (flac, m4a, mp3, mp4, mpeg, mpga, oga, ogg, wav, webm)",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Flac => "flac",
            Self::M4a => "m4a",
            Self::Mp3 => "mp3",
            Self::Mp4 => "mp4",
            Self::Mpeg => "mpeg",
            Self::Mpga => "mpga",
            Self::Oga => "oga",
            Self::Ogg => "ogg",
            Self::Wav => "wav",
            Self::Webm => "webm",
        }
    }

    /// MIME type used for the multipart upload
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Flac => "audio/flac",
            Self::M4a => "audio/mp4",
            Self::Mp3 => "audio/mpeg",
            Self::Mp4 => "video/mp4",
            Self::Mpeg => "audio/mpeg",
            Self::Mpga => "audio/mpeg",
            Self::Oga => "audio/ogg",
            Self::Ogg => "audio/ogg",
            Self::Wav => "audio/wav",
            Self::Webm => "audio/webm",
        }
    }
}

/// Binary audio payload plus its declared format
///
/// Owned by the orchestrator for the duration of one run; the raw bytes are
/// not inspected after transcription completes.
#[derive(Debug, Clone)]
pub struct AudioInput {
    pub bytes: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioInput {
    /// Build an input from raw bytes and a declared extension.
    pub fn new(bytes: Vec<u8>, extension: &str) -> Result<Self> {
        let format = AudioFormat::from_extension(extension)?;
        Ok(Self { bytes, format })
    }

    /// Upload filename with an extension the service recognizes.
    pub fn upload_name(&self) -> String {
        format!("audio.{}", self.format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_allow_listed_extension() {
        for ext in [
            "flac", "m4a", "mp3", "mp4", "mpeg", "mpga", "oga", "ogg", "wav", "webm",
        ] {
            assert!(AudioFormat::from_extension(ext).is_ok(), "{} rejected", ext);
        }
    }

    #[test]
    fn accepts_uppercase_and_dotted_extensions() {
        assert_eq!(AudioFormat::from_extension(".MP3").unwrap(), AudioFormat::Mp3);
        assert_eq!(AudioFormat::from_extension("Wav").unwrap(), AudioFormat::Wav);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = AudioFormat::from_extension("aiff").expect_err("aiff should be rejected");
        assert!(matches!(err, NotesmithError::UnsupportedFormat(_)));
        assert!(err.to_string().contains("aiff"));
    }

    #[test]
    fn upload_name_uses_normalized_extension() {
        let input = AudioInput::new(vec![0u8; 4], ".OGG").unwrap();
        assert_eq!(input.upload_name(), "audio.ogg");
    }
}
