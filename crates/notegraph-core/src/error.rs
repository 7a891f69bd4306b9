//! Error types for notegraph.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! This ensures composable error handling across crates.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all notegraph operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Neither index file exists in the working directory
    #[error("No table of contents found in {dir}")]
    MissingTableOfContents { dir: PathBuf },

    /// An index file parsed but named no notes
    #[error("Table of contents is empty: {path}")]
    EmptyTableOfContents { path: PathBuf },

    /// A row of the tabular index has the wrong shape
    #[error("Malformed index at line {line}: {reason}")]
    MalformedIndex { line: usize, reason: String },

    /// The same identifier appears twice in the tabular index
    #[error("Duplicate identifier at line {line}: {id}")]
    DuplicateIdentifier { id: String, line: usize },

    /// HTML markup could not be parsed
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Archive could not be opened or extracted
    #[error("Archive error: {reason}")]
    ArchiveError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Not found in graph
    #[error("Not found in graph: {key}")]
    NotFound { key: String },

    /// A graph node has no title in the index
    #[error("No title for note: {id}")]
    MissingTitle { id: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create a missing table of contents error
    pub fn missing_toc(dir: impl Into<PathBuf>) -> Self {
        Error::MissingTableOfContents { dir: dir.into() }
    }

    /// Create an empty table of contents error
    pub fn empty_toc(path: impl Into<PathBuf>) -> Self {
        Error::EmptyTableOfContents { path: path.into() }
    }

    /// Create a malformed index error
    pub fn malformed_index(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedIndex {
            line,
            reason: reason.into(),
        }
    }

    /// Create a duplicate identifier error
    pub fn duplicate_identifier(id: impl Into<String>, line: usize) -> Self {
        Error::DuplicateIdentifier {
            id: id.into(),
            line,
        }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create an archive error
    pub fn archive_error(reason: impl Into<String>) -> Self {
        Error::ArchiveError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound { key: key.into() }
    }

    /// Create a missing title error
    pub fn missing_title(id: impl Into<String>) -> Self {
        Error::MissingTitle { id: id.into() }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error ends an analysis before any graph exists
    pub fn is_index_failure(&self) -> bool {
        matches!(
            self,
            Error::MissingTableOfContents { .. }
                | Error::EmptyTableOfContents { .. }
                | Error::MalformedIndex { .. }
                | Error::DuplicateIdentifier { .. }
        )
    }
}
