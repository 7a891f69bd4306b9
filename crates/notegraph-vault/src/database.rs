//! Note database construction.
//!
//! Walks every note of the table of contents, extracting its text content
//! and its outgoing internal links.

use crate::workspace::WorkingDir;
use notegraph_core::prelude::*;
use notegraph_parser::ParsedNote;
use std::collections::HashMap;
use tracing::instrument;

/// Everything the graph stages need from one notebook
#[derive(Debug, Clone, Default)]
pub struct NoteDatabase {
    /// Table of contents plus, when unrestricted, discovered link targets
    pub index: NoteIndex,
    /// Text content of table-of-contents notes that could be read
    pub contents: HashMap<Identifier, NoteContent>,
    /// Link edges in discovery order (may contain duplicates across notes)
    pub edges: Vec<Edge>,
    /// Notes that could not be fully processed
    pub warnings: Vec<NoteWarning>,
}

impl NoteDatabase {
    pub fn content(&self, id: &str) -> Option<&NoteContent> {
        self.contents.get(id)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Builds a [`NoteDatabase`] from a table of contents
#[derive(Debug)]
pub struct DatabaseBuilder<'a> {
    dir: &'a WorkingDir,
    restrict: bool,
    fail_fast: bool,
}

impl<'a> DatabaseBuilder<'a> {
    /// Create a builder reading notes from `dir`.
    ///
    /// Defaults: edges restricted to the table of contents, per-note
    /// failures collected as warnings.
    pub fn new(dir: &'a WorkingDir) -> Self {
        Self {
            dir,
            restrict: true,
            fail_fast: false,
        }
    }

    /// Only keep edges whose target is in the table of contents
    pub fn restrict(mut self, restrict: bool) -> Self {
        self.restrict = restrict;
        self
    }

    /// Abort on the first note that cannot be processed
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Build the database.
    ///
    /// With `restrict`, the resulting index equals `toc` and links to other
    /// notes are dropped. Without it, every link becomes an edge and unknown
    /// targets join the index titled with their anchor text; their content is
    /// never read.
    ///
    /// A note that cannot be read still stays in the index, without content
    /// or outgoing edges. A note whose links cannot be parsed keeps its
    /// content but contributes no edges.
    #[instrument(skip_all, fields(notes = toc.len(), restrict = self.restrict), name = "build_database")]
    pub fn build(&self, toc: &NoteIndex) -> Result<NoteDatabase> {
        let mut db = NoteDatabase {
            index: toc.clone(),
            ..NoteDatabase::default()
        };

        for entry in toc.iter() {
            let html = match self.dir.read_note(&entry.title) {
                Ok(html) => html,
                Err(e) => {
                    let kind = match &e {
                        Error::FileNotFound { .. } => WarningKind::MissingFile,
                        other => WarningKind::Unreadable {
                            reason: other.to_string(),
                        },
                    };
                    self.record(&mut db, entry, kind, e)?;
                    continue;
                }
            };

            let parsed = ParsedNote::parse(&html);
            db.contents
                .insert(entry.id.clone(), NoteContent::new(parsed.text));

            let links = match parsed.links {
                Ok(links) => links,
                Err(e) => {
                    let kind = WarningKind::MalformedLinks {
                        reason: e.to_string(),
                    };
                    self.record(&mut db, entry, kind, e)?;
                    continue;
                }
            };

            for link in links {
                if self.restrict {
                    if toc.contains(link.target.as_str()) {
                        db.edges.push(Edge::new(entry.id.clone(), link.target));
                    }
                    continue;
                }

                if !db.index.contains(link.target.as_str()) {
                    log::debug!("Discovered note outside the index: {}", link.target);
                    db.index.insert(
                        link.target.clone(),
                        Title::new(link.text),
                        NoteOrigin::Discovered,
                    );
                }
                db.edges.push(Edge::new(entry.id.clone(), link.target));
            }
        }

        log::info!(
            "Built note database: {} notes ({} discovered), {} edges, {} warnings",
            db.index.len(),
            db.index.discovered_count(),
            db.edges.len(),
            db.warnings.len()
        );
        Ok(db)
    }

    /// Record a per-note failure, or propagate it when failing fast
    fn record(
        &self,
        db: &mut NoteDatabase,
        entry: &NoteEntry,
        kind: WarningKind,
        error: Error,
    ) -> Result<()> {
        if self.fail_fast {
            return Err(error);
        }
        let warning = NoteWarning {
            id: entry.id.clone(),
            title: entry.title.clone(),
            path: self.dir.note_path(&entry.title),
            kind,
        };
        log::warn!("Skipping note {}", warning);
        db.warnings.push(warning);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ID1: &str = "evernote:///view/1/s1/id1/id1/";
    const ID2: &str = "evernote:///view/1/s1/id2/id2/";
    const ID3: &str = "evernote:///view/1/s1/id3/id3/";

    fn toc() -> NoteIndex {
        let mut index = NoteIndex::new();
        index.insert(ID1.into(), "A".into(), NoteOrigin::Indexed);
        index.insert(ID2.into(), "B".into(), NoteOrigin::Indexed);
        index
    }

    fn notebook(a_html: &str) -> (TempDir, WorkingDir) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("A.html"), a_html).unwrap();
        fs::write(temp.path().join("B.html"), "<p>Leaf note</p>").unwrap();
        let dir = WorkingDir::from_dir(temp.path()).unwrap();
        (temp, dir)
    }

    fn a_linking_b_and_external() -> String {
        format!(
            r#"<p>Links to <a href="{ID2}">B</a> and <a href="{ID3}">External</a>
and <a href="{ID2}">B again</a></p>"#
        )
    }

    #[test]
    fn test_restricted_build_drops_outside_links() {
        let (_temp, dir) = notebook(&a_linking_b_and_external());
        let db = DatabaseBuilder::new(&dir).build(&toc()).unwrap();

        assert_eq!(db.index.len(), 2);
        assert_eq!(db.edges, vec![Edge::new(ID1, ID2)]);
        assert_eq!(db.content(ID2).unwrap().as_str(), "Leaf note");
        assert!(!db.has_warnings());
    }

    #[test]
    fn test_unrestricted_build_discovers_notes() {
        let (_temp, dir) = notebook(&a_linking_b_and_external());
        let db = DatabaseBuilder::new(&dir).restrict(false).build(&toc()).unwrap();

        assert_eq!(db.index.len(), 3);
        assert_eq!(db.index.title(ID3).unwrap().as_str(), "External");
        assert_eq!(db.index.get(ID3).unwrap().origin, NoteOrigin::Discovered);
        assert!(db.content(ID3).is_none());
        assert_eq!(db.edges, vec![Edge::new(ID1, ID2), Edge::new(ID1, ID3)]);
    }

    #[test]
    fn test_missing_note_is_warning() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("B.html"), "<p>B</p>").unwrap();
        let dir = WorkingDir::from_dir(temp.path()).unwrap();

        let db = DatabaseBuilder::new(&dir).build(&toc()).unwrap();

        assert_eq!(db.warnings.len(), 1);
        assert_eq!(db.warnings[0].kind, WarningKind::MissingFile);
        assert_eq!(db.warnings[0].id.as_str(), ID1);
        assert!(db.content(ID1).is_none());
        assert!(db.content(ID2).is_some());
        assert_eq!(db.index.len(), 2);
    }

    #[test]
    fn test_missing_note_fails_fast() {
        let temp = TempDir::new().unwrap();
        let dir = WorkingDir::from_dir(temp.path()).unwrap();

        let result = DatabaseBuilder::new(&dir).fail_fast(true).build(&toc());
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_malformed_links_keep_content() {
        let (_temp, dir) = notebook(&format!(r#"<p>Text</p><a href="{ID2}">never closed"#));
        let db = DatabaseBuilder::new(&dir).build(&toc()).unwrap();

        assert!(db.edges.is_empty());
        assert!(db.content(ID1).unwrap().as_str().starts_with("Text"));
        assert!(matches!(
            db.warnings[0].kind,
            WarningKind::MalformedLinks { .. }
        ));
    }

    #[test]
    fn test_title_with_unsafe_characters() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("What_ A_B.html"), "<p>ok</p>").unwrap();
        let dir = WorkingDir::from_dir(temp.path()).unwrap();

        let mut index = NoteIndex::new();
        index.insert(ID1.into(), "What? A/B".into(), NoteOrigin::Indexed);

        let db = DatabaseBuilder::new(&dir).build(&index).unwrap();
        assert_eq!(db.content(ID1).unwrap().as_str(), "ok");
    }

    #[test]
    fn test_self_link_is_an_edge() {
        let (_temp, dir) = notebook(&format!(r#"<a href="{ID1}">me</a>"#));
        let db = DatabaseBuilder::new(&dir).build(&toc()).unwrap();
        assert_eq!(db.edges, vec![Edge::new(ID1, ID1)]);
    }
}
