use scenegraph_core::{
    Edge, EdgeId, EntitiesContainer, Entity, Graph, GraphError, Node, NodeId,
};
use serde::Serialize;

/// Structural difference between two graphs, by id presence only.
///
/// A node with the same id in both graphs is never reported, even if its
/// attributes differ.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphDiff {
    /// Nodes of `a` absent from `b`.
    pub missing_nodes: Vec<Node>,
    /// Nodes of `b` absent from `a`.
    pub additional_nodes: Vec<Node>,
    pub missing_edges: Vec<Edge>,
    pub additional_edges: Vec<Edge>,
}

impl GraphDiff {
    pub fn is_empty(&self) -> bool {
        self.missing_nodes.is_empty()
            && self.additional_nodes.is_empty()
            && self.missing_edges.is_empty()
            && self.additional_edges.is_empty()
    }

    pub fn missing_node_ids(&self) -> Vec<NodeId> {
        self.missing_nodes.iter().map(|n| n.id().clone()).collect()
    }

    pub fn additional_node_ids(&self) -> Vec<NodeId> {
        self.additional_nodes.iter().map(|n| n.id().clone()).collect()
    }

    pub fn missing_edge_ids(&self) -> Vec<EdgeId> {
        self.missing_edges.iter().map(|e| e.id().clone()).collect()
    }

    pub fn additional_edge_ids(&self) -> Vec<EdgeId> {
        self.additional_edges.iter().map(|e| e.id().clone()).collect()
    }

    /// Turn `graph` (normally the diff's `a`) into `b`'s node and edge sets:
    /// drop missing edges and nodes, then add additional nodes and edges.
    ///
    /// The steps run on a copy that replaces `graph` only once all of them
    /// succeed, so a failing step leaves `graph` untouched.
    pub fn apply_to(&self, graph: &mut Graph) -> Result<(), GraphError> {
        let mut staged = graph.deep_copy();
        for edge in &self.missing_edges {
            staged.remove_edge(edge.id())?;
        }
        for node in &self.missing_nodes {
            staged.remove_node(node.id())?;
        }
        for node in &self.additional_nodes {
            staged.add_node(node.clone())?;
        }
        for edge in &self.additional_edges {
            staged.add_edge(edge.clone())?;
        }
        *graph = staged;
        Ok(())
    }
}

/// Entities of `from` whose ids are absent from `other`, in `from` order.
fn absent<T: Entity>(from: &EntitiesContainer<T>, other: &EntitiesContainer<T>) -> Vec<T> {
    from.ids_difference(other)
        .iter()
        .filter_map(|id| from.maybe_get(id))
        .cloned()
        .collect()
}

pub fn get_diff(a: &Graph, b: &Graph) -> GraphDiff {
    let diff = GraphDiff {
        missing_nodes: absent(a.nodes(), b.nodes()),
        additional_nodes: absent(b.nodes(), a.nodes()),
        missing_edges: absent(a.edges(), b.edges()),
        additional_edges: absent(b.edges(), a.edges()),
    };
    tracing::debug!(
        missing_nodes = diff.missing_nodes.len(),
        additional_nodes = diff.additional_nodes.len(),
        missing_edges = diff.missing_edges.len(),
        additional_edges = diff.additional_edges.len(),
        "graph diff"
    );
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegraph_core::{EdgeArgs, GraphOptions, NodeArgs};

    fn build(strict: bool, nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new(GraphOptions { strict });
        for id in nodes {
            g.create_node(*id, NodeArgs::default()).unwrap();
        }
        for (s, t) in edges {
            g.create_edge(*s, *t, EdgeArgs::default()).unwrap();
        }
        g
    }

    fn sorted<T: Ord>(mut v: Vec<T>) -> Vec<T> {
        v.sort();
        v
    }

    #[test]
    fn test_diff_lists() {
        let a = build(false, &["x", "y", "z"], &[("x", "y"), ("y", "z")]);
        let b = build(false, &["y", "z", "w"], &[("y", "z"), ("z", "w")]);
        let diff = get_diff(&a, &b);

        assert_eq!(diff.missing_node_ids(), vec![NodeId::from("x")]);
        assert_eq!(diff.additional_node_ids(), vec![NodeId::from("w")]);
        assert_eq!(diff.missing_edge_ids(), vec![EdgeId::from("x:::y")]);
        assert_eq!(diff.additional_edge_ids(), vec![EdgeId::from("z:::w")]);
        assert!(!diff.is_empty());
    }

    #[test]
    fn test_diff_symmetry() {
        let a = build(false, &["1", "2", "3"], &[("1", "2")]);
        let b = build(false, &["2", "4"], &[("2", "4")]);
        let ab = get_diff(&a, &b);
        let ba = get_diff(&b, &a);
        assert_eq!(
            sorted(ab.missing_node_ids()),
            sorted(ba.additional_node_ids())
        );
        assert_eq!(
            sorted(ab.missing_edge_ids()),
            sorted(ba.additional_edge_ids())
        );
    }

    #[test]
    fn test_presence_only() {
        let mut a = Graph::default();
        a.create_node("same", NodeArgs::labeled("old")).unwrap();
        let mut b = Graph::default();
        b.create_node("same", NodeArgs::labeled("new")).unwrap();
        assert!(get_diff(&a, &b).is_empty());
    }

    #[test]
    fn test_apply_reproduces_target_sets() {
        let mut a = build(true, &["p", "q", "r"], &[("p", "q"), ("q", "r")]);
        let b = build(true, &["q", "r", "s"], &[("q", "r"), ("r", "s")]);
        let diff = get_diff(&a, &b);
        diff.apply_to(&mut a).unwrap();

        assert_eq!(sorted(a.nodes().ids().to_vec()), sorted(b.nodes().ids().to_vec()));
        assert_eq!(sorted(a.edges().ids().to_vec()), sorted(b.edges().ids().to_vec()));
        assert!(get_diff(&a, &b).is_empty());
    }

    #[test]
    fn test_failed_apply_leaves_target_unchanged() {
        let mut a = build(true, &["p", "q"], &[("p", "q")]);
        let b = build(false, &["q", "s"], &[("s", "ghost")]);
        let diff = get_diff(&a, &b);

        let err = diff.apply_to(&mut a).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidReference {
                from: "s".into(),
                to: "ghost".into(),
            }
        );
        assert_eq!(
            sorted(a.nodes().ids().to_vec()),
            vec![NodeId::from("p"), NodeId::from("q")]
        );
        assert_eq!(a.edges().ids().to_vec(), vec![EdgeId::from("p:::q")]);
    }
}
