/*!
 * Error types for the docedit library.
 *
 * Decoding never fails past the transcoder boundary, so most of these
 * variants end up rendered into placeholder text. Encoding failures are
 * the exception: they are returned to the caller and abort the save.
 */

use thiserror::Error;

/// Errors that can occur while converting between stored payloads and text
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// No backend is able to handle the requested format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The stored payload could not be read (bad zip, missing part, broken XML)
    #[error("Corrupt input: {0}")]
    CorruptInput(String),

    /// Building the output payload failed
    #[error("Failed to encode {media_type}: {reason}")]
    EncodeFailure {
        /// Media type being produced
        media_type: String,
        /// What went wrong
        reason: String,
    },

    /// The transport encoding of the payload is invalid
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl TranscodeError {
    pub fn corrupt(reason: impl std::fmt::Display) -> Self {
        Self::CorruptInput(reason.to_string())
    }

    pub fn encode_failure(media_type: &str, reason: impl std::fmt::Display) -> Self {
        Self::EncodeFailure {
            media_type: media_type.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error must abort a save rather than degrade to a placeholder
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::EncodeFailure { .. } | Self::UnsupportedFormat(_))
    }
}

impl From<zip::result::ZipError> for TranscodeError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::CorruptInput(error.to_string())
    }
}

impl From<quick_xml::Error> for TranscodeError {
    fn from(error: quick_xml::Error) -> Self {
        Self::CorruptInput(error.to_string())
    }
}

/// Error reported by the `docedit` binary, classified by where it came from
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from transcoding
    #[error("Transcode error: {0}")]
    Transcode(#[from] TranscodeError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
