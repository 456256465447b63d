/*!
 * End-to-end tests: load a document from disk, edit it and write it back
 */

use anyhow::Result;
use docedit::app_config::Config;
use docedit::editor::DocumentEditor;
use docedit::file_utils::FileManager;
use docedit::Document;

use crate::common::{self, DOCX};

#[test]
fn test_workflow_textFile_shouldEditInPlace() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "page.html", b"<p>Hi</p>")?;
    let editor = DocumentEditor::with_config(&Config::default());

    let mut document = FileManager::read_document(&path)?;
    let view = editor.open(&document);
    assert!(view.is_editable);
    assert_eq!(view.content, "<p>Hi</p>");

    let edited = view.content.replace("Hi", "Hello");
    assert!(editor.save(&mut document, &edited)?);
    FileManager::write_document(&path, &document)?;

    assert_eq!(std::fs::read_to_string(&path)?, "<p>Hello</p>");
    Ok(())
}

#[test]
fn test_workflow_docxFile_shouldStayDocx() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "report.docx", &common::word_processor_docx())?;
    let editor = DocumentEditor::with_config(&Config::default());

    let mut document = FileManager::read_document(&path)?;
    let text = editor.open(&document).content;
    assert_eq!(text, "Quarterly Report\nSee appendix");

    editor.save(&mut document, &format!("{}\nAdded line", text))?;
    let written = FileManager::write_document(&path, &document)?;
    assert_eq!(written, path);

    let reloaded = FileManager::read_document(&path)?;
    assert_eq!(reloaded.media_type, DOCX);
    assert_eq!(editor.open(&reloaded).content, "Quarterly Report\nSee appendix\nAdded line");
    Ok(())
}

#[test]
fn test_workflow_docxWithoutBackends_shouldBecomeTextFile() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "report.docx", &common::word_processor_docx())?;

    let mut config = Config::default();
    config.docx.backends.clear();
    let editor = DocumentEditor::with_config(&config);

    let mut document = FileManager::read_document(&path)?;
    assert!(editor.open(&document).content.starts_with("[DOCX text extraction is not supported"));

    editor.save(&mut document, "Rewritten from scratch")?;
    let written = FileManager::write_document(&path, &document)?;

    assert_eq!(written, temp_dir.path().join("report.txt"));
    assert!(!path.exists());
    assert_eq!(std::fs::read_to_string(written)?, "Rewritten from scratch");
    Ok(())
}

#[test]
fn test_workflow_jsonTransport_shouldCarryBase64Payload() -> Result<()> {
    let editor = DocumentEditor::with_config(&Config::default());
    let json = r#"{"name": "data.json", "mimetype": "application/json", "datas": "eyJhIjogMX0="}"#;

    let mut document: Document = serde_json::from_str(json)?;
    assert_eq!(editor.open(&document).content, r#"{"a": 1}"#);

    editor.save(&mut document, r#"{"a": 2}"#)?;
    let value = serde_json::to_value(&document)?;
    assert_eq!(value["datas"], "eyJhIjogMn0=");
    Ok(())
}
