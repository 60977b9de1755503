use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use scenegraph_core::{EdgeId, Entity, Graph, NodeId};
use serde::Serialize;

/// Edges around a node grouped by ring distance.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DegreeExpansion {
    /// Degree level to the edges first reached at that level. Levels that
    /// reach no new edge are absent.
    pub degrees_to_edges: BTreeMap<usize, Vec<EdgeId>>,
    /// Edge to the level it was first reached at.
    pub edges_to_degree: IndexMap<EdgeId, usize>,
}

impl DegreeExpansion {
    pub fn degree_of(&self, edge: &EdgeId) -> Option<usize> {
        self.edges_to_degree.get(edge).copied()
    }

    pub fn edges_at(&self, degree: usize) -> &[EdgeId] {
        self.degrees_to_edges
            .get(&degree)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Deepest level that reached at least one edge.
    pub fn max_reached(&self) -> Option<usize> {
        self.degrees_to_edges.keys().next_back().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges_to_degree.len()
    }
}

/// Expand outward from `node` in rings, up to `max_degree`.
///
/// Edges count as undirected here. Ring 1 is every edge touching `node`;
/// ring k is every not-yet-seen edge touching a node first reached in ring
/// k-1. An edge keeps the first ring it was seen in.
pub fn edges_to_degree(node: &NodeId, max_degree: usize, graph: &Graph) -> DegreeExpansion {
    let mut expansion = DegreeExpansion::default();
    let mut reached: HashSet<NodeId> = HashSet::from([node.clone()]);
    let mut frontier: Vec<NodeId> = vec![node.clone()];

    for degree in 1..=max_degree {
        if frontier.is_empty() {
            break;
        }
        let mut ring = Vec::new();
        let mut next_frontier = Vec::new();
        for edge in graph.edges_connected_to(&frontier) {
            if expansion.edges_to_degree.contains_key(edge.id()) {
                continue;
            }
            expansion.edges_to_degree.insert(edge.id().clone(), degree);
            ring.push(edge.id().clone());
            for endpoint in [edge.source(), edge.target()] {
                if reached.insert(endpoint.clone()) {
                    next_frontier.push(endpoint.clone());
                }
            }
        }
        if !ring.is_empty() {
            expansion.degrees_to_edges.insert(degree, ring);
        }
        frontier = next_frontier;
    }

    tracing::debug!(
        %node,
        max_degree,
        edges = expansion.edge_count(),
        "degree expansion"
    );
    expansion
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegraph_core::{EdgeArgs, NodeArgs};

    fn star_with_second_ring() -> Graph {
        let mut g = Graph::default();
        g.create_node("C", NodeArgs::default()).unwrap();
        for i in 1..=5 {
            let leaf = format!("L{i}");
            let outer = format!("O{i}");
            g.create_node(leaf.as_str(), NodeArgs::default()).unwrap();
            g.create_node(outer.as_str(), NodeArgs::default()).unwrap();
            // Alternate direction so attribution cannot depend on it.
            if i % 2 == 0 {
                g.create_edge("C", leaf.as_str(), EdgeArgs::default())
                    .unwrap();
            } else {
                g.create_edge(leaf.as_str(), "C", EdgeArgs::default())
                    .unwrap();
            }
            g.create_edge(leaf.as_str(), outer.as_str(), EdgeArgs::default())
                .unwrap();
        }
        g
    }

    #[test]
    fn test_star_attribution() {
        let g = star_with_second_ring();
        let expansion = edges_to_degree(&"C".into(), 3, &g);

        assert_eq!(expansion.edges_at(1).len(), 5);
        assert_eq!(expansion.edges_at(2).len(), 5);
        assert!(expansion.edges_at(3).is_empty());
        assert_eq!(expansion.max_reached(), Some(2));

        for edge in g.edges_connected_to([&NodeId::from("C")]) {
            assert_eq!(expansion.degree_of(edge.id()), Some(1));
        }
        assert_eq!(expansion.degree_of(&"L1:::O1".into()), Some(2));
    }

    #[test]
    fn test_max_degree_bounds_expansion() {
        let g = star_with_second_ring();
        let expansion = edges_to_degree(&"C".into(), 1, &g);
        assert_eq!(expansion.edge_count(), 5);
        assert!(expansion.degree_of(&"L1:::O1".into()).is_none());
    }

    #[test]
    fn test_triangle_edge_keeps_first_degree() {
        let mut g = Graph::default();
        for (s, t) in [("a", "b"), ("a", "c"), ("b", "c"), ("c", "d")] {
            g.create_edge(s, t, EdgeArgs::default()).unwrap();
        }
        let expansion = edges_to_degree(&"a".into(), 5, &g);
        assert_eq!(expansion.degree_of(&"a:::b".into()), Some(1));
        assert_eq!(expansion.degree_of(&"a:::c".into()), Some(1));
        assert_eq!(expansion.degree_of(&"b:::c".into()), Some(2));
        assert_eq!(expansion.degree_of(&"c:::d".into()), Some(2));
        assert_eq!(expansion.edges_at(2).len(), 2);
        assert_eq!(expansion.max_reached(), Some(2));
    }

    #[test]
    fn test_zero_degree_and_isolated_node() {
        let g = star_with_second_ring();
        assert_eq!(edges_to_degree(&"C".into(), 0, &g), DegreeExpansion::default());
        assert_eq!(
            edges_to_degree(&"nowhere".into(), 3, &g),
            DegreeExpansion::default()
        );
    }
}
