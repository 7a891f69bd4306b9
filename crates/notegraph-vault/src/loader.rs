//! Table-of-contents loading.
//!
//! The index file is looked up in a fixed priority order: the tab-separated
//! file first, the HTML page second. Finding neither ends the analysis.

use crate::workspace::{WorkingDir, read_lossy};
use notegraph_core::prelude::*;
use notegraph_parser::{parse_html_index, parse_tsv_index};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::instrument;

/// Which index file a table of contents came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", content = "path", rename_all = "snake_case")]
pub enum TocSource {
    Tsv(PathBuf),
    Html(PathBuf),
}

impl TocSource {
    pub fn path(&self) -> &PathBuf {
        match self {
            TocSource::Tsv(path) | TocSource::Html(path) => path,
        }
    }
}

/// Loaded, non-empty table of contents
#[derive(Debug, Clone)]
pub struct TableOfContents {
    pub source: TocSource,
    pub index: NoteIndex,
    /// HTML files in the working directory that no listed note maps to
    pub unlisted: Vec<PathBuf>,
}

/// Find the index file to use, without reading it
pub fn locate_table_of_contents(dir: &WorkingDir, config: &IndexConfig) -> Result<TocSource> {
    let tsv = dir.file(&config.tsv_file);
    if tsv.is_file() {
        return Ok(TocSource::Tsv(tsv));
    }

    let html = dir.file(&config.html_file);
    if html.is_file() {
        return Ok(TocSource::Html(html));
    }

    Err(Error::missing_toc(dir.path()))
}

/// Locate and parse the table of contents.
///
/// Returns a non-empty index or an error; never a partial mapping.
#[instrument(skip_all, name = "load_table_of_contents")]
pub fn load_table_of_contents(dir: &WorkingDir, config: &IndexConfig) -> Result<TableOfContents> {
    let source = locate_table_of_contents(dir, config)?;
    let content = read_lossy(source.path())?;

    let index = match &source {
        TocSource::Tsv(_) => parse_tsv_index(&content)?,
        TocSource::Html(_) => parse_html_index(&content)?,
    };

    if index.is_empty() {
        return Err(Error::empty_toc(source.path()));
    }

    log::info!(
        "Loaded {} notes from {}",
        index.len(),
        source.path().display()
    );

    let unlisted = unlisted_note_files(dir, &source, &index);
    if !unlisted.is_empty() {
        log::warn!(
            "{} note files are not in the table of contents and will not be read",
            unlisted.len()
        );
        for path in &unlisted {
            log::debug!("Unlisted note file: {}", path.display());
        }
    }

    Ok(TableOfContents {
        source,
        index,
        unlisted,
    })
}

/// HTML files that are neither the index page nor the file of a listed note
fn unlisted_note_files(dir: &WorkingDir, source: &TocSource, index: &NoteIndex) -> Vec<PathBuf> {
    let listed: HashSet<PathBuf> = index
        .iter()
        .map(|entry| dir.note_path(&entry.title))
        .collect();

    dir.html_files()
        .into_iter()
        .filter(|path| path != source.path() && !listed.contains(path))
        .collect()
}
