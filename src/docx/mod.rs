/*!
 * Minimal WordprocessingML support.
 *
 * Only paragraph text is modelled: the reader pulls paragraph strings out of
 * the main document part of a package, and the writer produces a fresh
 * package holding one plain paragraph per line. Styles, images and run
 * formatting are not preserved.
 */

pub mod reader;
pub mod writer;

pub use reader::{read_main_part, read_main_part_with_limit, paragraphs, ParagraphScope, MAX_MAIN_PART_BYTES};
pub use writer::build_package;

/// WordprocessingML main namespace
pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Location of the main document part when the package relationships do not say otherwise
pub const DEFAULT_MAIN_PART: &str = "word/document.xml";

pub(crate) const PACKAGE_RELS_PART: &str = "_rels/.rels";

pub(crate) const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
