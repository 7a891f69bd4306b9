//! # notegraph parser
//!
//! HTML parsing for exported notebooks.
//!
//! This crate provides:
//! - Internal link extraction from note documents ([`extract_note_links`])
//! - Plain-text extraction for hover content ([`html_to_text`])
//! - Table-of-contents parsing from TSV or HTML ([`parse_tsv_index`], [`parse_html_index`])
//!
//! ## Quick Start
//!
//! ```
//! use notegraph_parser::{extract_note_links, html_to_text};
//!
//! let html = r#"<div>See <a href="evernote:///view/1/s1/a/a/">Alpha</a></div>"#;
//!
//! let links = extract_note_links(html).unwrap();
//! assert_eq!(links.text("evernote:///view/1/s1/a/a/"), Some("Alpha"));
//! assert_eq!(html_to_text(html), "See Alpha");
//! ```
//!
//! ## Internal links
//!
//! Only anchors whose `href` starts with `evernote://` are internal links.
//! Everything else (web links, mail links, named anchors) is ignored.
//!
//! Parsing uses `std::sync::LazyLock` regexes with cheap substring
//! pre-filters, so documents without internal links return immediately.

pub mod anchors;
pub mod text;
pub mod toc;

pub use anchors::{ExtractedLink, NoteLinks, extract_note_links, extract_note_links_lossy};
pub use text::{decode_entities, html_to_text, inline_text};
pub use toc::{parse_html_index, parse_tsv_index};

/// Parsed form of one note document
#[derive(Debug)]
pub struct ParsedNote {
    pub text: String,
    /// Links, or the reason they could not be extracted
    pub links: notegraph_core::Result<NoteLinks>,
}

impl ParsedNote {
    /// Parse text content and links of one note
    pub fn parse(html: &str) -> Self {
        Self {
            text: html_to_text(html),
            links: extract_note_links(html),
        }
    }
}
