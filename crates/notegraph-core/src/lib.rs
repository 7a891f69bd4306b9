//! # notegraph core
//!
//! Core note identity model, error types, and configuration for the notebook
//! link graph analyzer. This crate defines the canonical types that all other
//! crates depend on.
//!
//! ## Core Modules
//!
//! - [`models`] - Identifiers, titles, content, edges and the bidirectional [`NoteIndex`]
//! - [`error`] - Error type and Result alias
//! - [`config`] - Analysis configuration with builder and validation
//! - [`utils`] - JSON and CSV helpers
//!
//! ## Usage
//!
//! ```
//! use notegraph_core::prelude::*;
//!
//! let mut index = NoteIndex::new();
//! index.insert("evernote:///a".into(), "Alpha".into(), NoteOrigin::Indexed);
//!
//! assert_eq!(index.title("evernote:///a").map(Title::as_str), Some("Alpha"));
//! assert_eq!(Title::from("Q?A").note_file_name(), "Q_A.html");
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;
pub use utils::{CsvBuilder, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{AnalysisConfig, IndexConfig, RankingConfig, RenderConfig};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Edge, Identifier, NoteContent, NoteEntry, NoteIndex, NoteOrigin, NoteWarning, Title,
        WarningKind,
    };
}
