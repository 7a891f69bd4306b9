//! Title lookup and subgraph queries.

use crate::graph::NoteGraph;
use notegraph_core::{Identifier, NoteIndex, Result};

/// Resolve the first title containing `query` through the title to
/// identifier mapping.
///
/// Titles are tried in the order they first entered the index
/// (table-of-contents order, then discovery order). When several notes share
/// the matching title, the mapping's last-write-wins entry is returned.
pub fn fuzzy_lookup<'a>(index: &'a NoteIndex, query: &str) -> Option<&'a Identifier> {
    index
        .iter()
        .map(|entry| entry.title.as_str())
        .find(|title| title.contains(query))
        .and_then(|title| index.identifier_for_title(title))
}

/// Outcome of a subgraph query
#[derive(Debug, Clone)]
pub enum SubgraphQuery {
    /// The query matched a note; the graph is its weakly-connected component
    Found { target: Identifier, graph: NoteGraph },
    /// No title contains the query
    NoMatch,
}

/// Resolve a title query and extract the component around the match.
///
/// A query without a match is [`SubgraphQuery::NoMatch`], not an error. An
/// error is only returned when the matched note is not part of the graph.
pub fn query_subgraph(graph: &NoteGraph, index: &NoteIndex, query: &str) -> Result<SubgraphQuery> {
    let Some(target) = fuzzy_lookup(index, query) else {
        log::info!("No note title contains '{}'", query);
        return Ok(SubgraphQuery::NoMatch);
    };

    let sub = graph.subgraph(target.as_str())?;
    log::info!(
        "Query '{}' matched {} ({} notes in component)",
        query,
        target,
        sub.node_count()
    );
    Ok(SubgraphQuery::Found {
        target: target.clone(),
        graph: sub,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegraph_core::{Edge, Error, NoteOrigin};

    fn sample() -> (NoteIndex, NoteGraph) {
        let mut index = NoteIndex::new();
        index.insert("id1".into(), "Alpha project".into(), NoteOrigin::Indexed);
        index.insert("id2".into(), "Beta".into(), NoteOrigin::Indexed);
        index.insert("id3".into(), "Alpha review".into(), NoteOrigin::Discovered);
        index.insert("id4".into(), "Loner".into(), NoteOrigin::Indexed);
        let graph = NoteGraph::build(&index, &[Edge::new("id1", "id2"), Edge::new("id1", "id3")]);
        (index, graph)
    }

    #[test]
    fn test_fuzzy_lookup_first_match_in_index_order() {
        let (index, _) = sample();
        assert_eq!(fuzzy_lookup(&index, "Alpha").unwrap().as_str(), "id1");
        assert_eq!(fuzzy_lookup(&index, "review").unwrap().as_str(), "id3");
        assert_eq!(fuzzy_lookup(&index, "B").unwrap().as_str(), "id2");
    }

    #[test]
    fn test_fuzzy_lookup_title_collision_uses_latest_note() {
        let mut index = NoteIndex::new();
        index.insert("id1".into(), "Same".into(), NoteOrigin::Indexed);
        index.insert("id2".into(), "Same".into(), NoteOrigin::Indexed);
        index.insert("id3".into(), "Same but longer".into(), NoteOrigin::Indexed);

        assert_eq!(index.identifier_for_title("Same").unwrap().as_str(), "id2");
        assert_eq!(fuzzy_lookup(&index, "Same").unwrap().as_str(), "id2");
        assert_eq!(fuzzy_lookup(&index, "longer").unwrap().as_str(), "id3");
    }

    #[test]
    fn test_fuzzy_lookup_no_match() {
        let (index, _) = sample();
        assert!(fuzzy_lookup(&index, "Gamma").is_none());
    }

    #[test]
    fn test_fuzzy_lookup_is_case_sensitive() {
        let (index, _) = sample();
        assert!(fuzzy_lookup(&index, "alpha").is_none());
    }

    #[test]
    fn test_query_subgraph() {
        let (index, graph) = sample();

        match query_subgraph(&graph, &index, "Beta").unwrap() {
            SubgraphQuery::Found { target, graph } => {
                assert_eq!(target.as_str(), "id2");
                assert_eq!(graph.node_count(), 3);
                assert!(!graph.contains("id4"));
            }
            SubgraphQuery::NoMatch => panic!("expected a match"),
        }

        assert!(matches!(
            query_subgraph(&graph, &index, "Nothing").unwrap(),
            SubgraphQuery::NoMatch
        ));
    }

    #[test]
    fn test_query_subgraph_target_outside_graph() {
        let (index, _) = sample();
        let empty = NoteGraph::new();
        assert!(matches!(
            query_subgraph(&empty, &index, "Beta"),
            Err(Error::NotFound { .. })
        ));
    }
}
