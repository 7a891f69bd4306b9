//! # notegraph
//!
//! Link graph analysis and visualization for exported Evernote notebooks.
//!
//! A notebook export is a directory (or a `.zip` of one) holding one HTML
//! file per note and a table of contents. Notes link to each other with
//! `evernote://` URLs. This crate ties the pipeline together:
//!
//! 1. [`WorkingDir`](notegraph_vault::WorkingDir) opens the directory or archive
//! 2. the table of contents becomes the authoritative note index
//! 3. every note is read for text and internal links
//! 4. links become a directed graph ranked by PageRank
//! 5. an optional title query narrows the view to one connected component
//! 6. the view renders as an interactive HTML page, or a JSON/CSV report
//!
//! ## Quick Start
//!
//! ```no_run
//! use notegraph::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let config = AnalysisConfig::builder()
//!         .restrict(false)
//!         .query("Project")
//!         .build()?;
//!
//!     let analysis = analyze(Path::new("Notebook.zip"), &config)?;
//!     let html = analysis.export(ExportFormat::Html, &config.render)?;
//!     std::fs::write("graph.html", html)?;
//!
//!     for note in analysis.ranked_notes().iter().take(5) {
//!         println!("{:>3}. {} ({:.4})", note.rank, note.title, note.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod pipeline;
pub mod settings;

pub use pipeline::{Analysis, QueryResult, analyze};
pub use settings::{ENV_PREFIX, load_config};

pub mod prelude {
    pub use crate::pipeline::{Analysis, QueryResult, analyze};
    pub use crate::settings::load_config;
    pub use notegraph_core::prelude::*;
    pub use notegraph_export::{ExportFormat, GraphView, HtmlRenderer, RankedNote};
    pub use notegraph_graph::{GraphStats, NoteGraph, Ranking, SubgraphQuery};
    pub use notegraph_vault::{NoteDatabase, TocSource, WorkingDir};
}
