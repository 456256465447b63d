use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::document::Document;
use crate::media_type;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

/// A file found while scanning a directory
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub media_type: &'static str,
    pub is_editable: bool,
}

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Load a file as a document; the media type is guessed from its extension
    pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Document> {
        let path = path.as_ref();
        let payload = fs::read(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        let name = path
            .file_name()
            .ok_or_else(|| anyhow!("Not a file path: {:?}", path))?
            .to_string_lossy()
            .to_string();

        Ok(Document::new(name.clone(), media_type::guess_from_name(&name), payload))
    }

    /// Write a document next to `original`, under the document's current name.
    ///
    /// The payload goes to a temporary file in the same directory first and is
    /// then moved into place. When the name changed, the original file is
    /// removed; an existing file already holding the new name is never
    /// replaced. Returns the path written.
    pub fn write_document<P: AsRef<Path>>(original: P, document: &Document) -> Result<PathBuf> {
        let original = original.as_ref();
        let dir = match original.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let target = dir.join(&document.name);
        let renamed = target.file_name() != original.file_name();

        let mut temp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
        temp.write_all(&document.payload)
            .with_context(|| format!("Failed to write temporary file for {:?}", target))?;
        if renamed {
            temp.persist_noclobber(&target).map_err(|e| {
                anyhow!("Refusing to rename document onto existing file {:?}: {}", target, e.error)
            })?;
        } else {
            temp.persist(&target)
                .map_err(|e| anyhow!("Failed to move document into place at {:?}: {}", target, e.error))?;
        }

        if renamed && original.exists() {
            warn!("Document renamed, removing {:?}", original);
            fs::remove_file(original)
                .with_context(|| format!("Failed to remove original file: {:?}", original))?;
        }

        debug!("Wrote {} bytes to {:?}", document.payload.len(), target);
        Ok(target)
    }

    /// Read edited text from a file, or from stdin when no path is given
    pub fn read_text_input(path: Option<&Path>) -> Result<String> {
        match path {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read text file: {:?}", path)),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read text from stdin")?;
                Ok(text)
            }
        }
    }

    /// List the files under a directory with their guessed media type
    pub fn scan_documents<P: AsRef<Path>>(dir: P) -> Result<Vec<ScannedFile>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                let media_type = media_type::guess_from_name(path);
                result.push(ScannedFile {
                    path: path.to_path_buf(),
                    media_type,
                    is_editable: media_type::is_editable(media_type),
                });
            }
        }

        Ok(result)
    }
}
