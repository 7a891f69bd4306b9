//! # Note Graph Analysis
//!
//! Directed link graph between notes using petgraph.
//!
//! Provides:
//! - Graph construction from the note index and edge list
//! - Importance ranking (PageRank)
//! - Fuzzy title lookup
//! - Weakly-connected subgraph extraction
//! - Graph statistics
//!
//! ## Quick Start
//!
//! ```
//! use notegraph_graph::{NoteGraph, pagerank};
//! use notegraph_core::prelude::*;
//!
//! let mut index = NoteIndex::new();
//! index.insert("evernote:///1".into(), "A".into(), NoteOrigin::Indexed);
//! index.insert("evernote:///2".into(), "B".into(), NoteOrigin::Indexed);
//!
//! let graph = NoteGraph::build(&index, &[Edge::new("evernote:///1", "evernote:///2")]);
//! let ranking = pagerank(&graph, &RankingConfig::default());
//!
//! assert_eq!(graph.node_count(), 2);
//! assert!(ranking.score("evernote:///2") > ranking.score("evernote:///1"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Nodes**: every note of the index, including isolated ones
//! - **Edges**: one per ordered pair of notes; self-loops are kept
//! - **Subgraphs**: reachability ignores direction, edges keep it
//!
//! ## Performance Characteristics
//!
//! - Graph construction: O(n + m)
//! - Subgraph extraction: O(n + m)
//! - Ranking: O(k (n + m)) for k iterations

pub mod graph;
pub mod query;
pub mod ranking;

pub use graph::{GraphStats, NoteGraph};
pub use query::{SubgraphQuery, fuzzy_lookup, query_subgraph};
pub use ranking::{Ranking, pagerank};

pub mod prelude {
    pub use crate::graph::{GraphStats, NoteGraph};
    pub use crate::query::{SubgraphQuery, fuzzy_lookup, query_subgraph};
    pub use crate::ranking::{Ranking, pagerank};
    pub use notegraph_core::prelude::*;
}
