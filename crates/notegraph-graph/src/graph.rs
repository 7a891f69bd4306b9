//! Directed note graph using petgraph

use notegraph_core::prelude::*;
use petgraph::algo::connected_components;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Directed link graph between notes.
///
/// Nodes are note identifiers; at most one edge exists per ordered pair.
/// Self-loops are kept.
#[derive(Debug, Clone, Default)]
pub struct NoteGraph {
    graph: DiGraph<Identifier, ()>,
    node_index: HashMap<Identifier, NodeIndex>,
}

impl NoteGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from the note index and edge list.
    ///
    /// Every index entry becomes a node (in index order) before any edge is
    /// added, so isolated notes are kept.
    pub fn build(index: &NoteIndex, edges: &[Edge]) -> Self {
        let mut graph = Self::new();
        for id in index.identifiers() {
            graph.add_note(id.clone());
        }
        for edge in edges {
            if !graph.add_edge(edge) {
                log::debug!(
                    "Skipping edge with unknown endpoint: {} -> {}",
                    edge.source,
                    edge.target
                );
            }
        }
        log::debug!(
            "Built graph: {} nodes, {} edges ({} input edges)",
            graph.node_count(),
            graph.edge_count(),
            edges.len()
        );
        graph
    }

    /// Add a node, returning the existing one if present
    pub fn add_note(&mut self, id: Identifier) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_index.insert(id, idx);
        idx
    }

    /// Add an edge between two existing nodes. Duplicate edges collapse.
    ///
    /// Returns `false` when either endpoint is not a node.
    pub fn add_edge(&mut self, edge: &Edge) -> bool {
        let (Some(&source), Some(&target)) = (
            self.node_index.get(&edge.source),
            self.node_index.get(&edge.target),
        ) else {
            return false;
        };
        self.graph.update_edge(source, target, ());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        match (self.node_index.get(source), self.node_index.get(target)) {
            (Some(&s), Some(&t)) => self.graph.contains_edge(s, t),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node identifiers in insertion order
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// All edges as (source, target) pairs
    pub fn edges(&self) -> impl Iterator<Item = (&Identifier, &Identifier)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()]))
    }

    /// Notes with no incoming or outgoing links
    pub fn isolated_notes(&self) -> Vec<&Identifier> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors_undirected(idx).next().is_none())
            .map(|idx| &self.graph[idx])
            .collect()
    }

    /// Identifiers of the weakly-connected component containing `id`, in
    /// node order
    pub fn weakly_connected_component(&self, id: &str) -> Result<Vec<Identifier>> {
        let members = self.component_members(id)?;
        Ok(self
            .graph
            .node_indices()
            .filter(|idx| members.contains(idx))
            .map(|idx| self.graph[idx].clone())
            .collect())
    }

    /// Induced subgraph over the weakly-connected component containing `id`.
    ///
    /// Reachability ignores edge direction; the returned edges keep theirs.
    pub fn subgraph(&self, id: &str) -> Result<NoteGraph> {
        let members = self.component_members(id)?;

        let mut sub = NoteGraph::new();
        for idx in self.graph.node_indices().filter(|idx| members.contains(idx)) {
            sub.add_note(self.graph[idx].clone());
        }
        for edge in self.graph.edge_references() {
            if members.contains(&edge.source()) && members.contains(&edge.target()) {
                sub.add_edge(&Edge::new(
                    self.graph[edge.source()].clone(),
                    self.graph[edge.target()].clone(),
                ));
            }
        }
        Ok(sub)
    }

    /// Breadth-first walk over the undirected view
    fn component_members(&self, id: &str) -> Result<HashSet<NodeIndex>> {
        let &start = self
            .node_index
            .get(id)
            .ok_or_else(|| Error::not_found(id))?;

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(idx) = queue.pop_front() {
            for neighbor in self.graph.neighbors_undirected(idx) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        Ok(visited)
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let node_count = self.graph.node_count();
        let edge_count = self.graph.edge_count();

        let average_links_per_note = if node_count > 0 {
            edge_count as f64 / node_count as f64
        } else {
            0.0
        };

        GraphStats {
            total_notes: node_count,
            total_links: edge_count,
            isolated_notes: self.isolated_notes().len(),
            self_loops: self
                .graph
                .edge_references()
                .filter(|e| e.source() == e.target())
                .count(),
            components: connected_components(&self.graph),
            average_links_per_note,
        }
    }

    pub(crate) fn inner(&self) -> &DiGraph<Identifier, ()> {
        &self.graph
    }
}

/// Statistics about the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_notes: usize,
    pub total_links: usize,
    pub isolated_notes: usize,
    pub self_loops: usize,
    /// Weakly-connected components
    pub components: usize,
    pub average_links_per_note: f64,
}
