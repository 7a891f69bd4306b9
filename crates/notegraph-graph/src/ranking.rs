//! Importance ranking by PageRank power iteration.
//!
//! Dangling nodes (no outgoing links) spread their mass uniformly, so the
//! iteration is a proper stochastic process for any finite directed graph:
//! scores are positive and sum to 1, and a graph without edges ranks
//! uniformly.

use crate::graph::NoteGraph;
use notegraph_core::{Identifier, RankingConfig};
use std::collections::HashMap;

/// Importance score per note
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    scores: HashMap<Identifier, f64>,
    iterations: usize,
    converged: bool,
}

impl Ranking {
    pub fn score(&self, id: &str) -> Option<f64> {
        self.scores.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterations performed
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the tolerance was reached before the iteration cap
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Sum of all scores (1 for a non-empty graph)
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, f64)> {
        self.scores.iter().map(|(id, &score)| (id, score))
    }

    /// Highest-scoring notes, ties broken by identifier
    pub fn top(&self, n: usize) -> Vec<(&Identifier, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

/// Compute PageRank scores for every node of the graph.
///
/// Stops once the L1 change between iterations drops below
/// `node_count * tolerance`. Reaching `max_iterations` first is not an
/// error: the last estimate is returned and [`Ranking::converged`] is false.
pub fn pagerank(graph: &NoteGraph, config: &RankingConfig) -> Ranking {
    let inner = graph.inner();
    let n = inner.node_count();
    if n == 0 {
        return Ranking {
            converged: true,
            ..Ranking::default()
        };
    }

    let n_f64 = n as f64;
    let damping = config.damping;
    let out_links: Vec<Vec<usize>> = inner
        .node_indices()
        .map(|idx| inner.neighbors(idx).map(|t| t.index()).collect())
        .collect();

    let mut rank = vec![1.0 / n_f64; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;

        let dangling_mass: f64 = out_links
            .iter()
            .zip(&rank)
            .filter(|(links, _)| links.is_empty())
            .map(|(_, r)| r)
            .sum();
        let base = (1.0 - damping) / n_f64 + damping * dangling_mass / n_f64;

        let mut next = vec![base; n];
        for (source, links) in out_links.iter().enumerate() {
            if links.is_empty() {
                continue;
            }
            let share = damping * rank[source] / links.len() as f64;
            for &target in links {
                next[target] += share;
            }
        }

        let delta: f64 = next.iter().zip(&rank).map(|(a, b)| (a - b).abs()).sum();
        rank = next;
        if delta < n_f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        log::warn!(
            "PageRank did not converge within {} iterations; using last estimate",
            config.max_iterations
        );
    }

    let total: f64 = rank.iter().sum();
    let scores = inner
        .node_indices()
        .map(|idx| (inner[idx].clone(), rank[idx.index()] / total))
        .collect();

    Ranking {
        scores,
        iterations,
        converged,
    }
}
