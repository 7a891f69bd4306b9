//! # Presentation and Export
//!
//! Turns an analyzed note graph into something a person can look at:
//!
//! - [`GraphView`]: display records for every node and edge
//! - [`HtmlRenderer`]: a standalone interactive HTML page
//! - [`AnalysisReportExporter`] and [`RankingExporter`]: JSON and CSV reports
//!
//! ## Quick Start
//!
//! ```
//! use notegraph_core::prelude::*;
//! use notegraph_export::{GraphView, HtmlRenderer};
//! use notegraph_graph::{NoteGraph, pagerank};
//! use std::collections::HashMap;
//!
//! # fn example() -> Result<()> {
//! let mut index = NoteIndex::new();
//! index.insert("evernote:///1".into(), "A".into(), NoteOrigin::Indexed);
//! let graph = NoteGraph::build(&index, &[]);
//! let ranking = pagerank(&graph, &RankingConfig::default());
//!
//! let view = GraphView::project(&graph, &index, &HashMap::new(), Some(&ranking))?;
//! let html = HtmlRenderer::new(RenderConfig::default()).render(&view)?;
//! assert!(html.contains("evernote:///1"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Exporters return strings; writing them out is left to the caller.

pub mod html;
pub mod view;

pub use html::{HtmlRenderer, escape_html};
pub use view::{DisplayEdge, DisplayNode, GraphView};

use chrono::Utc;
use notegraph_core::prelude::*;
use notegraph_core::{CsvBuilder, to_json_string};
use notegraph_graph::{GraphStats, Ranking};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Output format for a finished analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Interactive HTML page
    Html,
    /// Full analysis report (pretty-printed)
    Json,
    /// Ranked note listing
    Csv,
}

/// One note with its importance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNote {
    pub rank: usize,
    pub id: Identifier,
    pub title: Title,
    pub score: f64,
    pub origin: NoteOrigin,
    /// Whether the note's text was read
    pub has_content: bool,
}

/// Full analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub timestamp: String,
    /// Directory or archive that was analyzed
    pub source: String,
    pub restrict: bool,
    pub stats: GraphStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Note the query resolved to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_target: Option<Identifier>,
    pub ranking_converged: bool,
    pub ranking_iterations: usize,
    pub warnings: Vec<NoteWarning>,
    /// Note files on disk that the table of contents does not list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unlisted_files: Vec<PathBuf>,
    pub notes: Vec<RankedNote>,
}

impl AnalysisReport {
    /// Start a report stamped with the current time
    pub fn new(source: impl Into<String>, stats: GraphStats, ranking: &Ranking) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            source: source.into(),
            restrict: true,
            stats,
            query: None,
            query_target: None,
            ranking_converged: ranking.converged(),
            ranking_iterations: ranking.iterations(),
            warnings: Vec::new(),
            unlisted_files: Vec::new(),
            notes: Vec::new(),
        }
    }
}

/// Rank every note of the index by score, highest first.
///
/// Ties are broken by identifier. Notes without a score are left out.
pub fn ranked_notes(
    index: &NoteIndex,
    ranking: &Ranking,
    contents: &HashMap<Identifier, NoteContent>,
) -> Vec<RankedNote> {
    ranking
        .top(ranking.len())
        .into_iter()
        .filter_map(|(id, score)| {
            let entry = index.get(id.as_str())?;
            Some((entry, score))
        })
        .enumerate()
        .map(|(i, (entry, score))| RankedNote {
            rank: i + 1,
            id: entry.id.clone(),
            title: entry.title.clone(),
            score,
            origin: entry.origin,
            has_content: contents.contains_key(&entry.id),
        })
        .collect()
}

/// Analysis report exporter
pub struct AnalysisReportExporter;

impl AnalysisReportExporter {
    /// Export analysis report as JSON
    pub fn to_json(report: &AnalysisReport) -> Result<String> {
        to_json_string(report, "analysis report")
    }
}

/// Ranked note listing exporter
pub struct RankingExporter;

impl RankingExporter {
    /// Export ranked notes as JSON
    pub fn to_json(notes: &[RankedNote]) -> Result<String> {
        to_json_string(notes, "ranked notes")
    }

    /// Export ranked notes as CSV
    pub fn to_csv(notes: &[RankedNote]) -> Result<String> {
        let csv = notes.iter().fold(
            CsvBuilder::new(&["rank", "title", "score", "origin", "has_content", "id"]),
            |csv, note| {
                csv.add_row(vec![
                    note.rank.to_string(),
                    note.title.to_string(),
                    format!("{:.6}", note.score),
                    match note.origin {
                        NoteOrigin::Indexed => "indexed".to_string(),
                        NoteOrigin::Discovered => "discovered".to_string(),
                    },
                    note.has_content.to_string(),
                    note.id.to_string(),
                ])
            },
        );
        Ok(csv.build())
    }
}
