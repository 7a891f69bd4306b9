//! End-to-end analysis of one notebook.

use notegraph_core::prelude::*;
use notegraph_export::{
    AnalysisReport, AnalysisReportExporter, ExportFormat, GraphView, HtmlRenderer, RankedNote,
    RankingExporter, ranked_notes,
};
use notegraph_graph::{NoteGraph, Ranking, SubgraphQuery, pagerank, query_subgraph};
use notegraph_vault::{DatabaseBuilder, NoteDatabase, TocSource, WorkingDir, load_table_of_contents};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// A subgraph query and what it resolved to
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub query: String,
    pub outcome: SubgraphQuery,
}

impl QueryResult {
    /// Identifier the query matched
    pub fn target(&self) -> Option<&Identifier> {
        match &self.outcome {
            SubgraphQuery::Found { target, .. } => Some(target),
            SubgraphQuery::NoMatch => None,
        }
    }
}

/// Result of analyzing one notebook
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Directory or archive that was analyzed
    pub source: PathBuf,
    pub toc_source: TocSource,
    /// Note files present on disk but missing from the table of contents
    pub unlisted_files: Vec<PathBuf>,
    pub restrict: bool,
    pub database: NoteDatabase,
    /// Graph over every note of the index
    pub graph: NoteGraph,
    /// Scores over the full graph
    pub ranking: Ranking,
    pub query: Option<QueryResult>,
    /// What gets drawn: the queried component, or the full graph
    pub view: GraphView,
}

impl Analysis {
    /// Graph that was projected into the view
    pub fn displayed_graph(&self) -> &NoteGraph {
        match self.query.as_ref().map(|q| &q.outcome) {
            Some(SubgraphQuery::Found { graph, .. }) => graph,
            _ => &self.graph,
        }
    }

    /// Every note ranked by score, highest first
    pub fn ranked_notes(&self) -> Vec<RankedNote> {
        ranked_notes(&self.database.index, &self.ranking, &self.database.contents)
    }

    /// Summary report of the run
    pub fn report(&self) -> AnalysisReport {
        let mut report = AnalysisReport::new(
            self.source.display().to_string(),
            self.graph.stats(),
            &self.ranking,
        );
        report.restrict = self.restrict;
        report.query = self.query.as_ref().map(|q| q.query.clone());
        report.query_target = self.query.as_ref().and_then(|q| q.target().cloned());
        report.warnings = self.database.warnings.clone();
        report.unlisted_files = self.unlisted_files.clone();
        report.notes = self.ranked_notes();
        report
    }

    /// Render the analysis in the requested format
    pub fn export(&self, format: ExportFormat, render: &RenderConfig) -> Result<String> {
        match format {
            ExportFormat::Html => HtmlRenderer::new(render.clone()).render(&self.view),
            ExportFormat::Json => AnalysisReportExporter::to_json(&self.report()),
            ExportFormat::Csv => RankingExporter::to_csv(&self.ranked_notes()),
        }
    }
}

/// Run the whole pipeline on a directory or `.zip` archive.
///
/// Stages: open the working directory, load the table of contents, build
/// the note database, build and rank the graph, resolve the optional query,
/// project the displayed graph. A query without a match renders the full
/// graph.
#[instrument(skip_all, fields(source = %source.display()), name = "analyze")]
pub fn analyze(source: &Path, config: &AnalysisConfig) -> Result<Analysis> {
    config.validate()?;

    let dir = WorkingDir::open(source, &config.index)?;
    let toc = load_table_of_contents(&dir, &config.index)?;

    let database = DatabaseBuilder::new(&dir)
        .restrict(config.restrict)
        .fail_fast(config.fail_fast)
        .build(&toc.index)?;

    let graph = NoteGraph::build(&database.index, &database.edges);
    let ranking = pagerank(&graph, &config.ranking);

    let query = match config.subgraph_query() {
        Some(q) => Some(QueryResult {
            query: q.to_string(),
            outcome: query_subgraph(&graph, &database.index, q)?,
        }),
        None => None,
    };
    if let Some(QueryResult {
        query,
        outcome: SubgraphQuery::NoMatch,
    }) = &query
    {
        log::warn!("Nothing found for '{}'; rendering the full graph", query);
    }

    let displayed = match query.as_ref().map(|q| &q.outcome) {
        Some(SubgraphQuery::Found { graph: sub, .. }) => sub,
        _ => &graph,
    };
    let view = GraphView::project(displayed, &database.index, &database.contents, Some(&ranking))?;

    Ok(Analysis {
        source: source.to_path_buf(),
        toc_source: toc.source,
        unlisted_files: toc.unlisted,
        restrict: config.restrict,
        database,
        graph,
        ranking,
        query,
        view,
    })
}
