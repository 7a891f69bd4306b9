//! Projection of the note graph into display records.

use notegraph_core::prelude::*;
use notegraph_graph::{NoteGraph, Ranking};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One node as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayNode {
    pub id: Identifier,
    /// Note title
    pub label: String,
    /// Note text shown on hover; absent for notes only seen as link targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
    /// Importance score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

/// One directed edge as drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEdge {
    pub from: Identifier,
    pub to: Identifier,
}

/// Everything the renderer draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub directed: bool,
    pub nodes: Vec<DisplayNode>,
    pub edges: Vec<DisplayEdge>,
}

impl GraphView {
    /// Map every graph node and edge to display records.
    ///
    /// Every node must have a title in `index`; a node without one is an
    /// error. Hover text and size are optional per node.
    pub fn project(
        graph: &NoteGraph,
        index: &NoteIndex,
        contents: &HashMap<Identifier, NoteContent>,
        ranking: Option<&Ranking>,
    ) -> Result<Self> {
        let nodes = graph
            .identifiers()
            .map(|id| {
                let title = index
                    .title(id.as_str())
                    .ok_or_else(|| Error::missing_title(id.as_str()))?;
                Ok(DisplayNode {
                    id: id.clone(),
                    label: title.to_string(),
                    hover: contents.get(id).map(|c| c.as_str().to_string()),
                    size: ranking.and_then(|r| r.score(id.as_str())),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let edges = graph
            .edges()
            .map(|(from, to)| DisplayEdge {
                from: from.clone(),
                to: to.clone(),
            })
            .collect();

        Ok(Self {
            directed: true,
            nodes,
            edges,
        })
    }

    pub fn node(&self, id: &str) -> Option<&DisplayNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegraph_graph::pagerank;

    fn fixture() -> (NoteIndex, HashMap<Identifier, NoteContent>, NoteGraph) {
        let mut index = NoteIndex::new();
        index.insert("id1".into(), "A".into(), NoteOrigin::Indexed);
        index.insert("id3".into(), "External".into(), NoteOrigin::Discovered);
        let mut contents = HashMap::new();
        contents.insert(Identifier::from("id1"), NoteContent::new("Body of A"));
        let graph = NoteGraph::build(&index, &[Edge::new("id1", "id3")]);
        (index, contents, graph)
    }

    #[test]
    fn test_projection() {
        let (index, contents, graph) = fixture();
        let ranking = pagerank(&graph, &RankingConfig::default());
        let view = GraphView::project(&graph, &index, &contents, Some(&ranking)).unwrap();

        let a = view.node("id1").unwrap();
        assert_eq!(a.label, "A");
        assert_eq!(a.hover.as_deref(), Some("Body of A"));
        assert!(a.size.is_some());

        let external = view.node("id3").unwrap();
        assert_eq!(external.label, "External");
        assert!(external.hover.is_none());

        assert_eq!(view.edges, vec![DisplayEdge { from: "id1".into(), to: "id3".into() }]);
    }

    #[test]
    fn test_projection_without_ranking() {
        let (index, contents, graph) = fixture();
        let view = GraphView::project(&graph, &index, &contents, None).unwrap();
        assert!(view.nodes.iter().all(|n| n.size.is_none()));
    }

    #[test]
    fn test_missing_title_is_error() {
        let (_, contents, graph) = fixture();
        let result = GraphView::project(&graph, &NoteIndex::new(), &contents, None);
        assert!(matches!(result, Err(Error::MissingTitle { .. })));
    }
}
