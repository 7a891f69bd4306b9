//! # Notebook Workspace
//!
//! Reading an exported notebook from disk.
//!
//! This crate provides:
//! - [`WorkingDir`]: the explicit working-directory context of a run, opened
//!   from a directory or extracted from a zip archive
//! - [`load_table_of_contents`]: the authoritative note index, from
//!   `mydict.txt` or `Table of Contents.html`
//! - [`DatabaseBuilder`]: text content, link edges and per-note warnings
//!
//! ## Quick Start
//!
//! ```no_run
//! use notegraph_vault::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let config = AnalysisConfig::default();
//!     let dir = WorkingDir::open(Path::new("Notebook.zip"), &config.index)?;
//!
//!     let toc = load_table_of_contents(&dir, &config.index)?;
//!     let db = DatabaseBuilder::new(&dir)
//!         .restrict(config.restrict)
//!         .build(&toc.index)?;
//!
//!     println!("{} notes, {} edges", db.index.len(), db.edges.len());
//!     for warning in &db.warnings {
//!         println!("warning: {}", warning);
//!     }
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod loader;
pub mod workspace;

pub use database::{DatabaseBuilder, NoteDatabase};
pub use loader::{TableOfContents, TocSource, load_table_of_contents, locate_table_of_contents};
pub use workspace::WorkingDir;

pub mod prelude {
    pub use crate::database::{DatabaseBuilder, NoteDatabase};
    pub use crate::loader::{TableOfContents, TocSource, load_table_of_contents};
    pub use crate::workspace::WorkingDir;
    pub use notegraph_core::prelude::*;
}
