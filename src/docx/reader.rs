use std::io::{Cursor, Read};
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::{DEFAULT_MAIN_PART, OFFICE_DOCUMENT_REL, PACKAGE_RELS_PART};
use crate::errors::TranscodeError;

// @module: Paragraph text extraction from DOCX packages

/// Upper bound on the inflated size of the main document part
pub const MAX_MAIN_PART_BYTES: u64 = 64 * 1024 * 1024;

// @const: Run content that is not paragraph text
const SKIPPED_SUBTREES: [&[u8]; 6] = [b"AlternateContent", b"drawing", b"pict", b"object", b"txbxContent", b"fldData"];

/// Which paragraphs of the document body are collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphScope {
    /// Only paragraphs that are direct children of the body, in order
    Body,
    /// Every paragraph in the part, including table cells
    All,
}

impl ParagraphScope {
    fn accepts(self, parent: Option<&[u8]>) -> bool {
        match self {
            Self::Body => parent == Some(b"body".as_slice()),
            Self::All => true,
        }
    }
}

/// Open a DOCX package and return the XML of its main document part.
pub fn read_main_part(payload: &[u8]) -> Result<String, TranscodeError> {
    read_main_part_with_limit(payload, MAX_MAIN_PART_BYTES)
}

/// Like `read_main_part`, failing once the inflated part exceeds `limit` bytes.
pub fn read_main_part_with_limit(payload: &[u8], limit: u64) -> Result<String, TranscodeError> {
    let mut archive = ZipArchive::new(Cursor::new(payload))?;

    let part_name = main_part_name(&mut archive)?;
    debug!("Reading main document part: {}", part_name);

    let part = archive
        .by_name(&part_name)
        .map_err(|e| TranscodeError::corrupt(format!("missing part {}: {}", part_name, e)))?;

    let mut xml = String::new();
    part.take(limit.saturating_add(1))
        .read_to_string(&mut xml)
        .map_err(|e| TranscodeError::corrupt(format!("unreadable part {}: {}", part_name, e)))?;
    if xml.len() as u64 > limit {
        return Err(TranscodeError::corrupt(format!(
            "part {} inflates beyond {} bytes",
            part_name, limit
        )));
    }
    Ok(xml)
}

// @resolves: Main part target from the package relationships
fn main_part_name(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<String, TranscodeError> {
    let rels = match archive.by_name(PACKAGE_RELS_PART) {
        Ok(mut file) => {
            let mut rels = String::new();
            file.read_to_string(&mut rels)
                .map_err(|e| TranscodeError::corrupt(format!("unreadable {}: {}", PACKAGE_RELS_PART, e)))?;
            rels
        }
        Err(_) => return Ok(DEFAULT_MAIN_PART.to_string()),
    };

    let mut reader = Reader::from_str(&rels);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut rel_type = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value().map_err(TranscodeError::corrupt)?.into_owned();
                    match attr.key.local_name().as_ref() {
                        b"Type" => rel_type = Some(value),
                        b"Target" => target = Some(value),
                        _ => {}
                    }
                }
                if let (Some(rel_type), Some(target)) = (rel_type, target) {
                    if rel_type == OFFICE_DOCUMENT_REL {
                        return Ok(target.trim_start_matches('/').to_string());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(DEFAULT_MAIN_PART.to_string())
}

/// Collect the text of each paragraph in document order.
///
/// Run text is concatenated; `w:tab` becomes `\t` and `w:br`/`w:cr` become
/// `\n`. Deleted text (`w:delText`) is ignored, and so is everything inside
/// drawings, text boxes and alternate content hosted by a run.
pub fn paragraphs(xml: &str, scope: ParagraphScope) -> Result<Vec<String>, TranscodeError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut paragraph_depth = 0;
    let mut skip_depth: Option<usize> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if skip_depth.is_none() {
                    let parent = stack.last().map(Vec::as_slice);
                    if current.is_some() && SKIPPED_SUBTREES.contains(&name.as_slice()) {
                        skip_depth = Some(stack.len());
                    } else if name == b"p" && current.is_none() && scope.accepts(parent) {
                        current = Some(String::new());
                        paragraph_depth = stack.len();
                    } else if name == b"t" && current.is_some() && parent == Some(b"r".as_slice()) {
                        in_text = true;
                    }
                }
                stack.push(name);
            }
            Event::Empty(_) if skip_depth.is_some() => {}
            Event::Empty(e) => {
                let name = e.local_name();
                let in_run = stack.last().is_some_and(|parent| parent == b"r");
                match (current.as_mut(), name.as_ref()) {
                    (Some(text), b"tab") if in_run => text.push('\t'),
                    (Some(text), b"br" | b"cr") if in_run => text.push('\n'),
                    (None, b"p") if scope.accepts(stack.last().map(Vec::as_slice)) => {
                        paragraphs.push(String::new());
                    }
                    _ => {}
                }
            }
            Event::Text(t) if in_text => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&t.unescape().map_err(TranscodeError::corrupt)?);
                }
            }
            Event::CData(c) if in_text => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => {
                let name = stack.pop();
                if skip_depth.is_some() {
                    if skip_depth == Some(stack.len()) {
                        skip_depth = None;
                    }
                    continue;
                }
                match name.as_deref() {
                    Some(b"t") => in_text = false,
                    Some(b"p") if stack.len() == paragraph_depth => {
                        if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(TranscodeError::corrupt("document part ends inside an open element"));
    }

    Ok(paragraphs)
}
