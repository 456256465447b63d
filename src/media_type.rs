use std::collections::HashSet;
use std::path::Path;
use once_cell::sync::Lazy;

// @module: Media type constants, editability and file name helpers

pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";
pub const TEXT_CSS: &str = "text/css";
pub const TEXT_JAVASCRIPT: &str = "text/javascript";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";
pub const TEXT_XML: &str = "text/xml";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension used when a document falls back to plain text
pub const TEXT_EXTENSION: &str = ".txt";

/// Media types that can be edited inline
pub const EDITABLE_MEDIA_TYPES: [&str; 8] = [
    TEXT_PLAIN,
    TEXT_HTML,
    TEXT_CSS,
    TEXT_JAVASCRIPT,
    APPLICATION_JSON,
    APPLICATION_XML,
    TEXT_XML,
    DOCX,
];

static EDITABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| EDITABLE_MEDIA_TYPES.into_iter().collect());

/// Check whether a document with this media type can be edited as text.
///
/// This is a plain lookup; callers decide whether to enforce it.
pub fn is_editable(media_type: &str) -> bool {
    EDITABLE.contains(media_type)
}

pub fn is_docx(media_type: &str) -> bool {
    media_type == DOCX
}

/// Replace the final extension of `name` with `.txt`.
///
/// Names already ending in `.txt` are returned unchanged, names without
/// a dot get the extension appended.
pub fn with_text_extension(name: &str) -> String {
    if name.ends_with(TEXT_EXTENSION) {
        return name.to_string();
    }
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    };
    format!("{}{}", stem, TEXT_EXTENSION)
}

// @returns: Media type for a file name, based on its extension
pub fn guess_from_name<P: AsRef<Path>>(name: P) -> &'static str {
    let ext = name
        .as_ref()
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" | "text" | "log" | "md" | "csv" => TEXT_PLAIN,
        "html" | "htm" => TEXT_HTML,
        "css" => TEXT_CSS,
        "js" | "mjs" => TEXT_JAVASCRIPT,
        "json" => APPLICATION_JSON,
        "xml" => APPLICATION_XML,
        "docx" => DOCX,
        _ => OCTET_STREAM,
    }
}
