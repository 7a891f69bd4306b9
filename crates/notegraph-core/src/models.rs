//! Core data models for the note identity model.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Type-Safe**: Newtypes keep identifiers, titles and content apart
//! - **Consistent by construction**: [`NoteIndex`] owns both directions of the
//!   identifier/title mapping

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// URI scheme of internal note links produced by the export.
pub const NOTE_LINK_SCHEME: &str = "evernote://";

/// Opaque note identifier (the full internal link URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Create an identifier from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier uses the internal note-link scheme
    pub fn is_note_link(&self) -> bool {
        is_note_link(&self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Human-readable note title; not guaranteed unique
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the exported note for this title.
    ///
    /// The export replaces `?` and `/` with `_` and appends `.html`.
    pub fn note_file_name(&self) -> String {
        let sanitized: String = self
            .0
            .chars()
            .map(|c| if matches!(c, '?' | '/') { '_' } else { c })
            .collect();
        format!("{}.html", sanitized)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Title {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Title {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for Title {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Plain-text body of one note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteContent(String);

impl NoteContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Directed link: `source` links to `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: Identifier,
    pub target: Identifier,
}

impl Edge {
    pub fn new(source: impl Into<Identifier>, target: impl Into<Identifier>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Where a note entered the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteOrigin {
    /// Listed in the table of contents
    Indexed,
    /// Only seen as a link target from an indexed note
    Discovered,
}

/// One note of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub id: Identifier,
    pub title: Title,
    pub origin: NoteOrigin,
}

/// Bidirectional identifier/title index.
///
/// Entries keep insertion order. Identifier → title is total over the index;
/// title → identifier resolves to the most recently inserted note with that
/// title.
#[derive(Debug, Clone, Default)]
pub struct NoteIndex {
    entries: Vec<NoteEntry>,
    by_id: HashMap<Identifier, usize>,
    by_title: HashMap<Title, usize>,
}

impl NoteIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a note. Returns `false` and leaves the index untouched when the
    /// identifier is already present.
    pub fn insert(&mut self, id: Identifier, title: Title, origin: NoteOrigin) -> bool {
        if self.by_id.contains_key(&id) {
            return false;
        }
        let position = self.entries.len();
        self.by_id.insert(id.clone(), position);
        self.by_title.insert(title.clone(), position);
        self.entries.push(NoteEntry { id, title, origin });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Look up a note by identifier
    pub fn get(&self, id: &str) -> Option<&NoteEntry> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    /// Title of a note
    pub fn title(&self, id: &str) -> Option<&Title> {
        self.get(id).map(|entry| &entry.title)
    }

    /// Identifier for an exact title (last write wins on collisions)
    pub fn identifier_for_title(&self, title: &str) -> Option<&Identifier> {
        self.by_title.get(title).map(|&i| &self.entries[i].id)
    }

    /// All entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &NoteEntry> {
        self.entries.iter()
    }

    /// All identifiers in insertion order
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter().map(|entry| &entry.id)
    }

    /// Number of notes that were only discovered through links
    pub fn discovered_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.origin == NoteOrigin::Discovered)
            .count()
    }
}

/// Why a single note could not be fully processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// The note file does not exist in the working directory
    MissingFile,
    /// The note file exists but could not be read
    Unreadable { reason: String },
    /// The note's anchors could not be parsed; its links were dropped
    MalformedLinks { reason: String },
}

/// Per-note problem collected during the database build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWarning {
    pub id: Identifier,
    pub title: Title,
    pub path: PathBuf,
    #[serde(flatten)]
    pub kind: WarningKind,
}

impl fmt::Display for NoteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::MissingFile => {
                write!(f, "'{}': missing file {}", self.title, self.path.display())
            }
            WarningKind::Unreadable { reason } => write!(
                f,
                "'{}': cannot read {}: {}",
                self.title,
                self.path.display(),
                reason
            ),
            WarningKind::MalformedLinks { reason } => {
                write!(f, "'{}': links dropped: {}", self.title, reason)
            }
        }
    }
}

/// Whether a URL uses the internal note-link scheme
pub fn is_note_link(url: &str) -> bool {
    url.starts_with(NOTE_LINK_SCHEME)
}
