/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use docedit::file_utils::FileManager;
use docedit::Document;

use crate::common::{self, DOCX};

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.txt", b"test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));
    Ok(())
}

#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

#[test]
fn test_readDocument_shouldGuessMediaTypeFromExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "report.docx", b"PK")?;

    let document = FileManager::read_document(&path)?;
    assert_eq!(document.name, "report.docx");
    assert_eq!(document.media_type, DOCX);
    assert_eq!(document.payload, b"PK");
    Ok(())
}

#[test]
fn test_writeDocument_withSameName_shouldOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "notes.txt", b"old")?;
    let document = Document::new("notes.txt", "text/plain", b"new".to_vec());

    let written = FileManager::write_document(&path, &document)?;
    assert_eq!(written, path);
    assert_eq!(std::fs::read(&path)?, b"new");
    Ok(())
}

#[test]
fn test_writeDocument_withNewName_shouldRemoveOriginal() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "report.docx", b"PK")?;
    let document = Document::new("report.txt", "text/plain", b"text".to_vec());

    let written = FileManager::write_document(&path, &document)?;
    assert_eq!(written, temp_dir.path().join("report.txt"));
    assert!(!path.exists());
    assert_eq!(std::fs::read_to_string(&written)?, "text");
    Ok(())
}

#[test]
fn test_writeDocument_withNewNameTaken_shouldKeepBothFiles() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "report.docx", b"PK original")?;
    let sibling = common::create_test_file(temp_dir.path(), "report.txt", b"UNRELATED IMPORTANT")?;
    let document = Document::new("report.txt", "text/plain", b"edited".to_vec());

    let result = FileManager::write_document(&path, &document);
    assert!(result.is_err());
    assert_eq!(std::fs::read(&sibling)?, b"UNRELATED IMPORTANT");
    assert_eq!(std::fs::read(&path)?, b"PK original");
    Ok(())
}

#[test]
fn test_readTextInput_withFile_shouldReadContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "edit.txt", "Grüße".as_bytes())?;
    assert_eq!(FileManager::read_text_input(Some(path.as_path()))?, "Grüße");
    Ok(())
}

#[test]
fn test_scanDocuments_shouldReportEditability() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    std::fs::create_dir(temp_dir.path().join("nested"))?;
    common::create_test_file(temp_dir.path(), "a.json", b"{}")?;
    common::create_test_file(&temp_dir.path().join("nested"), "b.png", b"")?;

    let files = FileManager::scan_documents(temp_dir.path())?;
    assert_eq!(files.len(), 2);

    let json = files.iter().find(|f| f.path.ends_with("a.json")).unwrap();
    assert!(json.is_editable);
    assert_eq!(json.media_type, "application/json");

    let png = files.iter().find(|f| f.path.ends_with("b.png")).unwrap();
    assert!(!png.is_editable);
    Ok(())
}
