use log::{debug, info};
use serde::Serialize;

use crate::app_config::{Config, EditorConfig};
use crate::document::Document;
use crate::errors::TranscodeError;
use crate::transcoder::Transcoder;

// @module: Read and write paths used by the editor dialog

/// What the editor dialog receives when it opens a document
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EditorView {
    pub success: bool,
    pub content: String,
    pub name: String,
    pub mimetype: String,
    pub is_editable: bool,
}

/// Outcome of a save request, shaped for a JSON response
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SaveOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveOutcome {
    pub fn saved() -> Self {
        Self {
            success: true,
            message: Some("Document saved successfully".to_string()),
            error: None,
        }
    }

    /// Nothing was written because the edited content was empty
    pub fn unchanged() -> Self {
        Self {
            success: true,
            message: Some("No changes to save".to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
        }
    }

    pub fn from_result(result: &Result<bool, TranscodeError>) -> Self {
        match result {
            Ok(true) => Self::saved(),
            Ok(false) => Self::unchanged(),
            Err(e) => Self::failed(format!("Error saving document: {}", e)),
        }
    }
}

/// Client action that opens the editor dialog for a document
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EditorAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub tag: String,
    pub target: String,
    pub params: EditorActionParams,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EditorActionParams {
    pub document_id: u64,
    pub document_name: String,
}

/// Document editor: pairs the transcoder with the editor integration settings
#[derive(Debug)]
pub struct DocumentEditor {
    transcoder: Transcoder,
    config: EditorConfig,
}

impl DocumentEditor {
    pub fn new(transcoder: Transcoder, config: EditorConfig) -> Self {
        Self { transcoder, config }
    }

    pub fn with_config(config: &Config) -> Self {
        Self::new(Transcoder::from_config(config), config.editor.clone())
    }

    pub fn transcoder(&self) -> &Transcoder {
        &self.transcoder
    }

    /// Decode a document for display
    pub fn open(&self, document: &Document) -> EditorView {
        debug!("Opening {:?} ({})", document.name, document.media_type);
        EditorView {
            success: true,
            content: self.transcoder.decode(&document.payload, &document.media_type),
            name: document.name.clone(),
            mimetype: document.media_type.clone(),
            is_editable: document.is_text_editable(),
        }
    }

    /// Write edited text back into a document.
    ///
    /// Returns `Ok(false)` when `content` is empty and the document was left
    /// untouched. On error the document is not modified.
    pub fn save(&self, document: &mut Document, content: &str) -> Result<bool, TranscodeError> {
        let Some(encoded) = self.transcoder.encode(content, &document.media_type, &document.name)? else {
            return Ok(false);
        };

        if encoded.name != document.name || encoded.media_type != document.media_type {
            info!(
                "Document {:?} ({}) stored as {:?} ({})",
                document.name, document.media_type, encoded.name, encoded.media_type
            );
        }

        document.payload = encoded.payload;
        document.media_type = encoded.media_type;
        document.name = encoded.name;
        Ok(true)
    }

    /// Client action descriptor for the "edit" button of a document
    pub fn action_for(&self, document_id: u64, document: &Document) -> EditorAction {
        EditorAction {
            action_type: "ir.actions.client".to_string(),
            tag: self.config.client_action_tag.clone(),
            target: "new".to_string(),
            params: EditorActionParams {
                document_id,
                document_name: document.name.clone(),
            },
        }
    }
}
