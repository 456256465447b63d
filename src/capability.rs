/*!
 * Structured-DOCX capabilities.
 *
 * A `DocxBackend` knows how to extract paragraph text from a package and,
 * optionally, how to build a new one. The transcoder holds an ordered list of
 * backends and uses the first one able to do the job; an empty list is the
 * degraded runtime where no structured DOCX support exists at all.
 */

use std::fmt;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::app_config::DocxConfig;
use crate::docx::{self, ParagraphScope};
use crate::errors::TranscodeError;

/// A source of structured DOCX support
pub trait DocxBackend: Send + Sync {
    /// Short identifier used in logs and probe output
    fn name(&self) -> &'static str;

    fn can_extract(&self) -> bool;

    fn can_build(&self) -> bool;

    /// Extract the editable text of a package
    fn extract_text(&self, payload: &[u8]) -> Result<String, TranscodeError>;

    /// Build a package from edited text
    fn build_document(&self, text: &str) -> Result<Vec<u8>, TranscodeError>;
}

/// Kinds of backend that can be listed in the configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Paragraph model: reads and writes body paragraphs
    Paragraphs,
    /// Raw text dump: extract only, includes table cells
    RawText,
}

impl BackendKind {
    pub fn instantiate(self) -> Box<dyn DocxBackend> {
        match self {
            Self::Paragraphs => Box::new(ParagraphBackend),
            Self::RawText => Box::new(RawTextBackend),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraphs => write!(f, "paragraphs"),
            Self::RawText => write!(f, "raw_text"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "paragraphs" => Ok(Self::Paragraphs),
            "raw_text" => Ok(Self::RawText),
            _ => Err(anyhow::anyhow!("Invalid DOCX backend: {}", s)),
        }
    }
}

// @struct: Body paragraphs, one per line, read and write
pub struct ParagraphBackend;

impl DocxBackend for ParagraphBackend {
    fn name(&self) -> &'static str {
        "paragraphs"
    }

    fn can_extract(&self) -> bool {
        true
    }

    fn can_build(&self) -> bool {
        true
    }

    fn extract_text(&self, payload: &[u8]) -> Result<String, TranscodeError> {
        let xml = docx::read_main_part(payload)?;
        Ok(docx::paragraphs(&xml, ParagraphScope::Body)?.join("\n"))
    }

    fn build_document(&self, text: &str) -> Result<Vec<u8>, TranscodeError> {
        docx::build_package(text)
    }
}

// @struct: Every paragraph followed by a blank line, extract only
pub struct RawTextBackend;

impl DocxBackend for RawTextBackend {
    fn name(&self) -> &'static str {
        "raw_text"
    }

    fn can_extract(&self) -> bool {
        true
    }

    fn can_build(&self) -> bool {
        false
    }

    fn extract_text(&self, payload: &[u8]) -> Result<String, TranscodeError> {
        let xml = docx::read_main_part(payload)?;
        let mut text = String::new();
        for paragraph in docx::paragraphs(&xml, ParagraphScope::All)? {
            text.push_str(&paragraph);
            text.push_str("\n\n");
        }
        Ok(text)
    }

    fn build_document(&self, _text: &str) -> Result<Vec<u8>, TranscodeError> {
        Err(TranscodeError::UnsupportedFormat(
            "raw_text backend cannot build DOCX documents".to_string(),
        ))
    }
}

/// Ordered preference list of DOCX backends
#[derive(Default)]
pub struct Capabilities {
    backends: Vec<Box<dyn DocxBackend>>,
}

impl Capabilities {
    /// No structured DOCX support
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_backends(backends: Vec<Box<dyn DocxBackend>>) -> Self {
        Self { backends }
    }

    /// Instantiate the backends listed in the configuration, in order
    pub fn detect(config: &DocxConfig) -> Self {
        let backends: Vec<Box<dyn DocxBackend>> = config
            .backends
            .iter()
            .map(|kind| kind.instantiate())
            .collect();
        debug!(
            "DOCX backends available: [{}]",
            backends.iter().map(|b| b.name()).collect::<Vec<_>>().join(", ")
        );
        Self { backends }
    }

    /// First backend able to extract text
    pub fn extractor(&self) -> Option<&dyn DocxBackend> {
        self.backends.iter().map(|b| &**b).find(|b| b.can_extract())
    }

    /// First backend able to build documents
    pub fn builder(&self) -> Option<&dyn DocxBackend> {
        self.backends.iter().map(|b| &**b).find(|b| b.can_build())
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Human readable summary of the active backends
    pub fn describe(&self) -> Vec<BackendDescription> {
        self.backends
            .iter()
            .map(|b| BackendDescription {
                name: b.name().to_string(),
                extract: b.can_extract(),
                build: b.can_build(),
            })
            .collect()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.backends.iter().map(|b| b.name())).finish()
    }
}

/// Probe output for one backend
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BackendDescription {
    pub name: String,
    pub extract: bool,
    pub build: bool,
}
