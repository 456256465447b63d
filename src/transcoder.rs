/*!
 * Document content transcoding.
 *
 * `decode` turns a stored payload into editable text and never fails: problems
 * are reported as bracketed placeholder text so the caller always has
 * something to show. `encode` goes the other way and does fail, because a
 * placeholder written back into a document would destroy its content.
 */

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, error, warn};
use sha2::{Digest, Sha256};

use crate::app_config::{Config, DocxFallback};
use crate::capability::Capabilities;
use crate::errors::TranscodeError;
use crate::media_type::{self, TEXT_PLAIN};

/// Shown instead of DOCX text when no backend can extract it
pub const DOCX_UNSUPPORTED_PLACEHOLDER: &str =
    "[DOCX text extraction is not supported: no DOCX backend available]";

/// Result of encoding edited text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument {
    /// New binary payload
    pub payload: Vec<u8>,
    /// Media type to store; differs from the input only after a plain-text fallback
    pub media_type: String,
    /// Document name to store; differs from the input only after a plain-text fallback
    pub name: String,
}

impl EncodedDocument {
    pub fn payload_base64(&self) -> String {
        encode_payload(&self.payload)
    }
}

/// Converts between stored payloads and editable text
#[derive(Debug, Default)]
pub struct Transcoder {
    capabilities: Capabilities,
    fallback: DocxFallback,
}

impl Transcoder {
    pub fn new(capabilities: Capabilities, fallback: DocxFallback) -> Self {
        Self { capabilities, fallback }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Capabilities::detect(&config.docx), config.docx.fallback)
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn fallback(&self) -> DocxFallback {
        self.fallback
    }

    /// Produce the editable text of a payload.
    pub fn decode(&self, payload: &[u8], media_type: &str) -> String {
        if payload.is_empty() {
            return String::new();
        }

        if !media_type::is_docx(media_type) {
            return String::from_utf8_lossy(payload).into_owned();
        }

        let Some(backend) = self.capabilities.extractor() else {
            warn!(
                "decode {}: no DOCX backend available ({})",
                media_type,
                fingerprint(payload)
            );
            return DOCX_UNSUPPORTED_PLACEHOLDER.to_string();
        };

        debug!("decode {} with {} backend ({})", media_type, backend.name(), fingerprint(payload));
        match backend.extract_text(payload) {
            Ok(text) => text,
            Err(e) => {
                error!("Error reading DOCX ({}): {}", fingerprint(payload), e);
                format!("[Error reading DOCX: {}]", e)
            }
        }
    }

    /// Decode a base64 transported payload into editable text.
    ///
    /// Whitespace inside the base64 text is ignored. Invalid base64 yields a
    /// placeholder instead of an error.
    pub fn decode_base64(&self, datas: &str, media_type: &str) -> String {
        match decode_payload(datas) {
            Ok(payload) => self.decode(&payload, media_type),
            Err(e) => {
                error!("Error decoding document ({}, {} base64 chars): {}", media_type, datas.len(), e);
                format!("[Error: {}]", e)
            }
        }
    }

    /// Encode edited text into a new payload.
    ///
    /// Callers are expected to skip saving when the text is empty; in that case
    /// nothing is encoded and `Ok(None)` is returned.
    pub fn encode(
        &self,
        text: &str,
        media_type: &str,
        name: &str,
    ) -> Result<Option<EncodedDocument>, TranscodeError> {
        if text.is_empty() {
            debug!("encode {}: empty text, nothing to do", media_type);
            return Ok(None);
        }

        if !media_type::is_docx(media_type) {
            return Ok(Some(EncodedDocument {
                payload: text.as_bytes().to_vec(),
                media_type: media_type.to_string(),
                name: name.to_string(),
            }));
        }

        if let Some(backend) = self.capabilities.builder() {
            debug!("encode {} with {} backend ({} chars)", media_type, backend.name(), text.len());
            let payload = backend.build_document(text).map_err(|e| {
                error!("Error saving document {:?} as {}: {}", name, media_type, e);
                e
            })?;
            return Ok(Some(EncodedDocument {
                payload,
                media_type: media_type.to_string(),
                name: name.to_string(),
            }));
        }

        match self.fallback {
            DocxFallback::ConvertToPlainText => {
                let new_name = media_type::with_text_extension(name);
                warn!(
                    "No DOCX backend can build documents; saving {:?} as plain text {:?}",
                    name, new_name
                );
                Ok(Some(EncodedDocument {
                    payload: text.as_bytes().to_vec(),
                    media_type: TEXT_PLAIN.to_string(),
                    name: new_name,
                }))
            }
            DocxFallback::Reject => {
                error!("Refusing to save {:?}: no DOCX backend can build documents", name);
                Err(TranscodeError::UnsupportedFormat(format!(
                    "cannot save {} as DOCX: no DOCX backend available",
                    name
                )))
            }
        }
    }
}

/// Decode the base64 transport form of a payload, ignoring ASCII whitespace
pub fn decode_payload(datas: &str) -> Result<Vec<u8>, TranscodeError> {
    let compact: String = datas.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

pub fn encode_payload(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}

// @returns: Log-safe description of a payload
fn fingerprint(payload: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(payload));
    format!("{} bytes, sha256 {}", payload.len(), &digest[..12])
}
