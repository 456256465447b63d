/*!
 * Tests for the editor read and write paths
 */

use docedit::app_config::{Config, EditorConfig};
use docedit::editor::{DocumentEditor, SaveOutcome};
use docedit::{Document, DocxFallback};

use crate::common::{self, DOCX};

fn editor() -> DocumentEditor {
    DocumentEditor::new(common::full_transcoder(), EditorConfig::default())
}

#[test]
fn test_open_withTextDocument_shouldReturnView() {
    let document = Document::from_base64("notes.txt", "text/plain", "SGVsbG8KV29ybGQ=").unwrap();
    let view = editor().open(&document);

    assert!(view.success);
    assert_eq!(view.content, "Hello\nWorld");
    assert_eq!(view.name, "notes.txt");
    assert_eq!(view.mimetype, "text/plain");
    assert!(view.is_editable);
}

#[test]
fn test_open_withImage_shouldFlagNotEditable() {
    let document = Document::new("logo.png", "image/png", vec![0x89, b'P', b'N', b'G']);
    let view = editor().open(&document);
    assert!(!view.is_editable);
}

#[test]
fn test_save_withText_shouldReplacePayload() {
    let mut document = Document::new("notes.txt", "text/plain", b"old".to_vec());
    let saved = editor().save(&mut document, "new content").unwrap();

    assert!(saved);
    assert_eq!(document.payload, b"new content");
    assert_eq!(document.name, "notes.txt");
}

#[test]
fn test_save_withEmptyContent_shouldLeaveDocumentUntouched() {
    let mut document = Document::new("notes.txt", "text/plain", b"old".to_vec());
    let before = document.clone();

    assert!(!editor().save(&mut document, "").unwrap());
    assert_eq!(document, before);
}

#[test]
fn test_save_docx_shouldRoundTripThroughOpen() {
    let editor = editor();
    let mut document = Document::new("letter.docx", DOCX, Vec::new());

    editor.save(&mut document, "Dear team,\n\nThanks.").unwrap();
    assert_eq!(document.media_type, DOCX);
    assert_eq!(editor.open(&document).content, "Dear team,\n\nThanks.");
}

#[test]
fn test_save_docxWithoutBackend_shouldRenameToText() {
    common::init_logger();
    let editor = DocumentEditor::new(
        common::bare_transcoder(DocxFallback::ConvertToPlainText),
        EditorConfig::default(),
    );
    let mut document = Document::new("letter.docx", DOCX, Vec::new());

    editor.save(&mut document, "plain now").unwrap();
    assert_eq!(document.name, "letter.txt");
    assert_eq!(document.media_type, "text/plain");
    assert_eq!(document.payload, b"plain now");
}

#[test]
fn test_save_withEncodeFailure_shouldNotModifyDocument() {
    common::init_logger();
    let editor = editor();
    let mut document = Document::new("letter.docx", DOCX, b"original".to_vec());
    let before = document.clone();

    let result = editor.save(&mut document, "null\u{0}byte");
    assert!(result.is_err());
    assert_eq!(document, before);

    let outcome = SaveOutcome::from_result(&result);
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().starts_with("Error saving document: "));
}

#[test]
fn test_saveOutcome_withEmptyContent_shouldNotClaimSaved() {
    let mut document = Document::new("notes.txt", "text/plain", b"old".to_vec());
    let outcome = SaveOutcome::from_result(&editor().save(&mut document, ""));

    assert!(outcome.success);
    assert_eq!(outcome, SaveOutcome::unchanged());
    assert_ne!(outcome, SaveOutcome::saved());
    assert_eq!(outcome.message.as_deref(), Some("No changes to save"));
}

#[test]
fn test_saveOutcome_serialization_shouldMatchResponseShape() {
    let json = serde_json::to_value(SaveOutcome::saved()).unwrap();
    assert_eq!(json, serde_json::json!({"success": true, "message": "Document saved successfully"}));

    let json = serde_json::to_value(SaveOutcome::failed("boom")).unwrap();
    assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
}

#[test]
fn test_actionFor_shouldDescribeClientAction() {
    let mut config = Config::default();
    config.editor.client_action_tag = "custom_editor".to_string();
    let editor = DocumentEditor::with_config(&config);
    let document = Document::new("a.txt", "text/plain", Vec::new());

    let json = serde_json::to_value(editor.action_for(7, &document)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "ir.actions.client",
            "tag": "custom_editor",
            "target": "new",
            "params": {"document_id": 7, "document_name": "a.txt"}
        })
    );
}
