//! Table-of-contents parsing.
//!
//! Two formats are understood:
//! - a tab-separated file with one `title<TAB>identifier` row per note
//! - an HTML page whose internal anchors name every note
//!
//! Both produce a [`NoteIndex`] whose entries are all [`NoteOrigin::Indexed`].
//! Emptiness is not checked here; the caller knows which file it read.

use crate::anchors::extract_note_links;
use notegraph_core::{Error, Identifier, NoteIndex, NoteOrigin, Result, Title};

/// Parse a tab-separated index.
///
/// Blank lines are ignored. Any other row must have exactly two columns and
/// a non-empty identifier; identifiers must be unique.
pub fn parse_tsv_index(content: &str) -> Result<NoteIndex> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut index = NoteIndex::new();

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() != 2 {
            return Err(Error::malformed_index(
                line_no,
                format!(
                    "expected 2 tab-separated columns (title, identifier), found {}",
                    columns.len()
                ),
            ));
        }

        let title = columns[0];
        let id = columns[1].trim();
        if id.is_empty() {
            return Err(Error::malformed_index(line_no, "empty identifier"));
        }

        if !index.insert(Identifier::new(id), Title::new(title), NoteOrigin::Indexed) {
            return Err(Error::duplicate_identifier(id, line_no));
        }
    }

    Ok(index)
}

/// Parse an HTML index page.
///
/// Every internal anchor becomes a note titled with its anchor text; repeated
/// anchors keep their first text. A page whose anchors cannot be parsed is an
/// error.
pub fn parse_html_index(content: &str) -> Result<NoteIndex> {
    let links = extract_note_links(content)
        .map_err(|e| Error::parse_error(format!("Invalid HTML table of contents: {}", e)))?;

    let mut index = NoteIndex::new();
    for link in links {
        index.insert(link.target, Title::new(link.text), NoteOrigin::Indexed);
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_loads_every_row() {
        let tsv = "Alpha\tevernote:///1\nBeta\tevernote:///2\n\nGamma\tevernote:///3\r\n";
        let index = parse_tsv_index(tsv).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.title("evernote:///2").unwrap().as_str(), "Beta");
        assert_eq!(index.title("evernote:///3").unwrap().as_str(), "Gamma");
    }

    #[test]
    fn test_tsv_wrong_column_count() {
        let err = parse_tsv_index("Alpha\tevernote:///1\nBroken row\n").unwrap_err();
        assert!(matches!(err, Error::MalformedIndex { line: 2, .. }));

        let err = parse_tsv_index("a\tb\tc\n").unwrap_err();
        assert!(matches!(err, Error::MalformedIndex { line: 1, .. }));
    }

    #[test]
    fn test_tsv_duplicate_identifier_is_fatal() {
        let err = parse_tsv_index("A\tevernote:///1\nB\tevernote:///1\n").unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentifier { line: 2, .. }));
    }

    #[test]
    fn test_tsv_strips_bom() {
        let index = parse_tsv_index("\u{feff}A\tevernote:///1").unwrap();
        assert_eq!(index.identifier_for_title("A").unwrap().as_str(), "evernote:///1");
    }

    #[test]
    fn test_html_index() {
        let html = r#"<html><body><h1>Table of Contents</h1><ol>
<li><a href="evernote:///1">Alpha</a></li>
<li><a href="evernote:///2">Beta</a></li>
<li><a href="evernote:///1">Alpha duplicate</a></li>
</ol></body></html>"#;
        let index = parse_html_index(html).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.title("evernote:///1").unwrap().as_str(), "Alpha");
    }

    #[test]
    fn test_html_index_without_links_is_empty() {
        assert!(parse_html_index("<p>nothing</p>").unwrap().is_empty());
    }
}
