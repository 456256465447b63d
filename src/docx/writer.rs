use std::io::{Cursor, Write};
use chrono::Utc;
use once_cell::sync::Lazy;
use quick_xml::escape::escape;
use regex::Regex;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{DEFAULT_MAIN_PART, OFFICE_DOCUMENT_REL, PACKAGE_RELS_PART, WORDML_NS};
use crate::errors::TranscodeError;
use crate::media_type::DOCX;

// @module: DOCX package construction

// @const: Characters that XML 1.0 cannot carry
static XML_INVALID_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x{FFFE}\x{FFFF}]").expect("static regex")
});

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#;

/// Build a DOCX package with one paragraph per line of `text`.
///
/// Lines are split on `\n`; a trailing `\r` is dropped, tabs become `w:tab`
/// and any remaining `\r` becomes a line break inside the paragraph.
pub fn build_package(text: &str) -> Result<Vec<u8>, TranscodeError> {
    if let Some(found) = XML_INVALID_CHARS.find(text) {
        let code = found.as_str().chars().next().map(u32::from).unwrap_or_default();
        return Err(TranscodeError::encode_failure(
            DOCX,
            format!("character U+{:04X} at byte {} is not XML compatible", code, found.start()),
        ));
    }

    let document = document_xml(text);
    let parts: [(&str, String); 4] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        (PACKAGE_RELS_PART, package_rels()),
        (DEFAULT_MAIN_PART, document),
        ("docProps/core.xml", core_properties()),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in parts.iter() {
        zip.start_file(*name, options)
            .map_err(|e| TranscodeError::encode_failure(DOCX, e))?;
        zip.write_all(content.as_bytes())
            .map_err(|e| TranscodeError::encode_failure(DOCX, e))?;
    }

    let cursor = zip.finish().map_err(|e| TranscodeError::encode_failure(DOCX, e))?;
    Ok(cursor.into_inner())
}

fn document_xml(text: &str) -> String {
    let mut xml = String::with_capacity(text.len() * 2 + 512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:document xmlns:w="{}"><w:body>"#, WORDML_NS));

    for line in text.split('\n') {
        push_paragraph(&mut xml, line.strip_suffix('\r').unwrap_or(line));
    }

    xml.push_str(SECTION_PROPERTIES);
    xml.push_str("</w:body></w:document>");
    xml
}

fn push_paragraph(xml: &mut String, line: &str) {
    if line.is_empty() {
        xml.push_str("<w:p/>");
        return;
    }

    xml.push_str("<w:p><w:r>");
    let mut segment = String::new();
    for ch in line.chars() {
        match ch {
            '\t' | '\r' => {
                push_text(xml, &segment);
                segment.clear();
                xml.push_str(if ch == '\t' { "<w:tab/>" } else { "<w:br/>" });
            }
            _ => segment.push(ch),
        }
    }
    push_text(xml, &segment);
    xml.push_str("</w:r></w:p>");
}

fn push_text(xml: &mut String, segment: &str) {
    if segment.is_empty() {
        return;
    }
    xml.push_str(r#"<w:t xml:space="preserve">"#);
    xml.push_str(&escape(segment));
    xml.push_str("</w:t>");
}

fn package_rels() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{}" Target="{}"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#,
        OFFICE_DOCUMENT_REL, DEFAULT_MAIN_PART
    )
}

fn core_properties() -> String {
    let now = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:creator>docedit</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified></cp:coreProperties>"#,
        now = now
    )
}
