//! Internal link extraction from note HTML.
//!
//! Scans `<a>` elements in document order and keeps the ones whose `href`
//! uses the internal note-link scheme. The first occurrence of each target
//! decides its display text.

use crate::text::{decode_entities, inline_text, strip_comments};
use notegraph_core::{Error, Identifier, Result, is_note_link};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Start of an anchor element: `<a>` or `<a ...>`, but not `<abbr>` etc.
static ANCHOR_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<a[\s>/]").unwrap());

static ANCHOR_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</a\s*>").unwrap());

/// `href` attribute in double, single, or no quotes.
static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

/// Fast pre-filter: skip scanning if the document has no internal links at all.
#[inline]
fn has_note_link(html: &str) -> bool {
    html.contains("evernote:")
}

/// One internal link found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    pub target: Identifier,
    /// Visible anchor text of the first occurrence
    pub text: String,
}

/// Internal links of one document, deduplicated, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteLinks {
    links: Vec<ExtractedLink>,
}

impl NoteLinks {
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, target: &str) -> bool {
        self.links.iter().any(|link| link.target.as_str() == target)
    }

    /// Display text recorded for a target
    pub fn text(&self, target: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.target.as_str() == target)
            .map(|link| link.text.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedLink> {
        self.links.iter()
    }
}

impl IntoIterator for NoteLinks {
    type Item = ExtractedLink;
    type IntoIter = std::vec::IntoIter<ExtractedLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

impl<'a> IntoIterator for &'a NoteLinks {
    type Item = &'a ExtractedLink;
    type IntoIter = std::slice::Iter<'a, ExtractedLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Extract internal note links from an HTML document.
///
/// `Ok` with an empty [`NoteLinks`] means the document parsed and simply has
/// no internal links. `Err` means an anchor element was malformed (an
/// unterminated start tag, or a last anchor that is never closed); nothing
/// is returned for the document in that case.
///
/// Start tags are read quote-aware, so `>` inside an attribute value does not
/// end the tag. A self-closing `<a .../>` has no body. An anchor body ends at
/// its `</a>` or at the next anchor start tag, whichever comes first.
/// Anchors without an `href` are skipped.
pub fn extract_note_links(html: &str) -> Result<NoteLinks> {
    if !has_note_link(html) {
        return Ok(NoteLinks::default());
    }

    let html = strip_comments(html);
    let mut links = Vec::new();
    let mut seen: HashSet<Identifier> = HashSet::new();
    let mut cursor = 0;
    let mut ordinal = 0;

    while let Some(start) = ANCHOR_START.find_at(&html, cursor) {
        ordinal += 1;
        let attrs_start = start.start() + 2;
        let Some(tag_end) = start_tag_end(&html, attrs_start) else {
            return Err(Error::parse_error(format!(
                "anchor #{} has an unterminated start tag",
                ordinal
            )));
        };
        let attrs = &html[attrs_start..tag_end];

        let body = if is_self_closing(attrs) {
            cursor = tag_end + 1;
            ""
        } else {
            let body_start = tag_end + 1;
            let close = ANCHOR_END.find_at(&html, body_start);
            let next_open = ANCHOR_START.find_at(&html, body_start);
            match (close, next_open) {
                (Some(close), Some(open)) if open.start() < close.start() => {
                    cursor = open.start();
                    &html[body_start..open.start()]
                }
                (Some(close), _) => {
                    cursor = close.end();
                    &html[body_start..close.start()]
                }
                (None, Some(open)) => {
                    cursor = open.start();
                    &html[body_start..open.start()]
                }
                (None, None) => {
                    return Err(Error::parse_error(format!(
                        "anchor #{} is never closed",
                        ordinal
                    )));
                }
            }
        };

        let Some(href) = href_of(attrs) else {
            continue;
        };
        if !is_note_link(&href) {
            continue;
        }

        let target = Identifier::new(href);
        if seen.insert(target.clone()) {
            links.push(ExtractedLink {
                target,
                text: inline_text(body),
            });
        }
    }

    Ok(NoteLinks { links })
}

/// Position of the `>` closing a start tag, ignoring `>` inside quoted
/// attribute values
fn start_tag_end(html: &str, from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (offset, &byte) in html.as_bytes()[from..].iter().enumerate() {
        match (quote, byte) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'>') => return Some(from + offset),
            (None, _) => {}
        }
    }
    None
}

/// `<a/>` or `<a name="x" />`, but not an unquoted value ending in `/`
fn is_self_closing(attrs: &str) -> bool {
    let Some(rest) = attrs.strip_suffix('/') else {
        return false;
    };
    rest.is_empty()
        || rest.ends_with(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}

/// Best-effort variant of [`extract_note_links`]: a document that fails to
/// parse yields no links.
pub fn extract_note_links_lossy(html: &str) -> NoteLinks {
    extract_note_links(html).unwrap_or_else(|e| {
        log::debug!("Ignoring links of unparseable document: {}", e);
        NoteLinks::default()
    })
}

fn href_of(attrs: &str) -> Option<String> {
    let caps = HREF.captures(attrs)?;
    let raw = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str()
        .trim();
    if raw.is_empty() {
        return None;
    }
    Some(decode_entities(raw).into_owned())
}
