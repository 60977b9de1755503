use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::GraphOptions;
use crate::container::{EdgeContainer, EntityIds, NodeContainer};
use crate::error::{GraphError, Result};
use crate::model::{Edge, EdgeArgs, EdgeId, Entity, Node, NodeArgs, NodeId};

/// Outgoing adjacency: node id to the targets of its outgoing edges.
pub type GraphMap = IndexMap<NodeId, Vec<NodeId>>;

/// A directed graph owning one node container and one edge container.
///
/// In strict mode an edge may only be inserted when both endpoints exist.
/// Removing a node never removes its edges; use
/// [`remove_node_and_edges`](Self::remove_node_and_edges) for that.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawGraph")]
pub struct Graph {
    #[serde(flatten)]
    options: GraphOptions,
    nodes: NodeContainer,
    edges: EdgeContainer,
}

#[derive(Deserialize)]
struct RawGraph {
    #[serde(flatten)]
    options: GraphOptions,
    #[serde(default)]
    nodes: NodeContainer,
    #[serde(default)]
    edges: EdgeContainer,
}

impl From<RawGraph> for Graph {
    fn from(raw: RawGraph) -> Self {
        Graph::from_containers(raw.nodes, raw.edges, raw.options)
    }
}

impl Graph {
    pub fn new(options: GraphOptions) -> Self {
        Self::from_containers(NodeContainer::new(), EdgeContainer::new(), options)
    }

    /// Wrap pre-built containers. Their strictness is aligned with `options`.
    pub fn from_containers(
        mut nodes: NodeContainer,
        mut edges: EdgeContainer,
        options: GraphOptions,
    ) -> Self {
        nodes.set_strict(options.strict);
        edges.set_strict(options.strict);
        Self {
            options,
            nodes,
            edges,
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_strict(&self) -> bool {
        self.options.strict
    }

    pub fn create_node(&mut self, id: impl Into<NodeId>, args: NodeArgs) -> Result<&Node> {
        let node = Node::from_args(id, args);
        let id = node.id().clone();
        self.nodes.add(node)?;
        self.nodes.get(&id)
    }

    /// Return the node with `id`, creating it from `args` if absent.
    pub fn create_node_if_missing(
        &mut self,
        id: impl Into<NodeId>,
        args: NodeArgs,
    ) -> Result<&Node> {
        let id = id.into();
        if !self.nodes.contains(&id) {
            self.nodes.add(Node::from_args(id.clone(), args))?;
        }
        self.nodes.get(&id)
    }

    pub fn create_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        args: EdgeArgs,
    ) -> Result<&Edge> {
        let edge = Edge::from_args(source, target, args);
        let id = edge.id().clone();
        self.add_edge(edge)?;
        self.edges.get(&id)
    }

    /// Return the edge `source -> target`, creating it from `args` if absent.
    pub fn create_edge_if_missing(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        args: EdgeArgs,
    ) -> Result<&Edge> {
        let source = source.into();
        let target = target.into();
        let id = EdgeId::between(&source, &target);
        if !self.edges.contains(&id) {
            self.add_edge(Edge::from_args(source, target, args))?;
        }
        self.edges.get(&id)
    }

    pub fn add_node(&mut self, node: Node) -> Result<()> {
        self.nodes.add(node)
    }

    /// Insert a pre-built edge. Strict mode checks both endpoints exist.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if self.is_strict()
            && !(self.nodes.contains(edge.source()) && self.nodes.contains(edge.target()))
        {
            return Err(GraphError::InvalidReference {
                from: edge.source().clone(),
                to: edge.target().clone(),
            });
        }
        self.edges.add(edge)
    }

    /// Insert or replace a node regardless of mode. Returns the replaced node.
    pub fn add_node_safe(&mut self, node: Node) -> Option<Node> {
        self.nodes.add_safe(node)
    }

    /// Insert or replace an edge regardless of mode, without endpoint
    /// checks. Returns the replaced edge.
    pub fn add_edge_safe(&mut self, edge: Edge) -> Option<Edge> {
        self.edges.add_safe(edge)
    }

    /// Remove a node. Incident edges are left in place.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Option<Node>> {
        self.nodes.remove(id)
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<Option<Edge>> {
        self.edges.remove(id)
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node_and_edges(&mut self, id: &NodeId) -> Result<(Option<Node>, Vec<Edge>)> {
        if self.is_strict() && !self.nodes.contains(id) {
            return Err(GraphError::not_found(Node::KIND, id));
        }
        let incident: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|e| e.touches(id))
            .map(|e| e.id().clone())
            .collect();
        let mut removed_edges = Vec::with_capacity(incident.len());
        for edge_id in &incident {
            if let Some(edge) = self.edges.remove(edge_id)? {
                removed_edges.push(edge);
            }
        }
        let node = self.nodes.remove(id)?;
        tracing::debug!(node = %id, edges = removed_edges.len(), "removed node with incident edges");
        Ok((node, removed_edges))
    }

    pub fn get_node(&self, id: &NodeId) -> Result<&Node> {
        self.nodes.get(id)
    }

    pub fn get_edge(&self, id: &EdgeId) -> Result<&Edge> {
        self.edges.get(id)
    }

    pub fn maybe_get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.maybe_get(id)
    }

    pub fn maybe_get_edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.maybe_get(id)
    }

    pub fn update_node<R>(&mut self, id: &NodeId, f: impl FnOnce(&mut Node) -> R) -> Result<R> {
        self.nodes.update(id, f)
    }

    pub fn update_edge<R>(&mut self, id: &EdgeId, f: impl FnOnce(&mut Edge) -> R) -> Result<R> {
        self.edges.update(id, f)
    }

    pub fn nodes(&self) -> &NodeContainer {
        &self.nodes
    }

    pub fn edges(&self) -> &EdgeContainer {
        &self.edges
    }

    pub fn nodes_by_tag(&self, tag: &str) -> Vec<&Node> {
        self.nodes.get_by_tag(tag)
    }

    pub fn nodes_by_type(&self, entity_type: &str) -> Vec<&Node> {
        self.nodes.get_by_type(entity_type)
    }

    pub fn edges_by_tag(&self, tag: &str) -> Vec<&Edge> {
        self.edges.get_by_tag(tag)
    }

    pub fn edges_by_type(&self, entity_type: &str) -> Vec<&Edge> {
        self.edges.get_by_type(entity_type)
    }

    /// Edges whose target is `node`. Linear in the number of edges.
    pub fn edges_to(&self, node: &NodeId) -> Vec<&Edge> {
        self.edges.filter(|e| e.target() == node)
    }

    /// Edges whose source is `node`. Linear in the number of edges.
    pub fn edges_from(&self, node: &NodeId) -> Vec<&Edge> {
        self.edges.filter(|e| e.source() == node)
    }

    /// Incoming and outgoing edges of any of `nodes`, each edge once.
    pub fn edges_connected_to<'a>(
        &self,
        nodes: impl IntoIterator<Item = &'a NodeId>,
    ) -> Vec<&Edge> {
        let wanted: HashSet<&NodeId> = nodes.into_iter().collect();
        self.edges
            .filter(|e| wanted.contains(e.source()) || wanted.contains(e.target()))
    }

    /// Edges with both endpoints in `nodes`.
    pub fn edges_connecting(&self, nodes: &EntityIds<NodeId>) -> Vec<&Edge> {
        self.edges
            .filter(|e| nodes.has(e.source()) && nodes.has(e.target()))
    }

    /// Outgoing adjacency for path search. Built fresh on each call.
    ///
    /// Every node gets an entry. Edges whose source is not a node still
    /// contribute an entry for that source.
    pub fn graph_map(&self) -> GraphMap {
        let mut map: GraphMap = self
            .nodes
            .iter()
            .map(|n| (n.id().clone(), Vec::new()))
            .collect();
        for edge in &self.edges {
            map.entry(edge.source().clone())
                .or_default()
                .push(edge.target().clone());
        }
        map
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges referencing at least one node that is not in the graph.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        self.edges
            .filter(|e| !self.nodes.contains(e.source()) || !self.nodes.contains(e.target()))
    }

    /// Deep-copied induced subgraph over `nodes`, in this graph's order.
    pub fn subgraph(&self, nodes: &EntityIds<NodeId>) -> Graph {
        let node_container: NodeContainer = self
            .nodes
            .filter(|n| nodes.has(n.id()))
            .into_iter()
            .cloned()
            .collect();
        let edge_container: EdgeContainer =
            self.edges_connecting(nodes).into_iter().cloned().collect();
        tracing::trace!(
            nodes = node_container.len(),
            edges = edge_container.len(),
            "extracted subgraph"
        );
        Graph::from_containers(node_container, edge_container, self.options)
    }

    pub fn deep_copy(&self) -> Graph {
        Graph {
            options: self.options,
            nodes: self.nodes.deep_copy(),
            edges: self.edges.deep_copy(),
        }
    }

    /// Index consistency of both containers. A strict graph additionally
    /// fails on its first dangling edge, which catches strict graphs built
    /// through deserialization or [`remove_node`](Self::remove_node).
    pub fn validate(&self) -> Result<()> {
        self.nodes.validate()?;
        self.edges.validate()?;
        if self.is_strict() {
            if let Some(edge) = self.dangling_edges().first() {
                return Err(GraphError::InvalidReference {
                    from: edge.source().clone(),
                    to: edge.target().clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(edges: Vec<&Edge>) -> Vec<&str> {
        edges.into_iter().map(|e| e.id().as_str()).collect()
    }

    fn chain(strict: bool) -> Graph {
        let mut g = Graph::new(GraphOptions { strict });
        for id in ["a", "b", "c"] {
            g.create_node(id, NodeArgs::default()).unwrap();
        }
        g.create_edge("a", "b", EdgeArgs::default()).unwrap();
        g.create_edge("b", "c", EdgeArgs::default()).unwrap();
        g
    }

    #[test]
    fn test_strict_duplicate_node_rejected() {
        let mut g = Graph::new(GraphOptions::strict());
        g.create_node("dup", NodeArgs::labeled("first")).unwrap();
        let err = g.create_node("dup", NodeArgs::labeled("second")).unwrap_err();
        assert!(err.to_string().contains("dup"));
        assert_eq!(g.get_node(&"dup".into()).unwrap().label(), Some("first"));
    }

    #[test]
    fn test_lenient_duplicate_node_overwrites() {
        let mut g = Graph::default();
        g.create_node("dup", NodeArgs::labeled("first")).unwrap();
        g.create_node("dup", NodeArgs::labeled("second")).unwrap();
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.get_node(&"dup".into()).unwrap().label(), Some("second"));
    }

    #[test]
    fn test_strict_dangling_edge_rejected() {
        let mut g = Graph::new(GraphOptions::strict());
        let err = g
            .create_edge("missing-a", "missing-b", EdgeArgs::default())
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidReference { .. }));
        assert_eq!(
            err.to_string(),
            "Cannot create edge between non-existent nodes in strict mode: missing-a -> missing-b"
        );
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_strict_add_edge_checks_endpoints() {
        let mut g = Graph::new(GraphOptions::strict());
        g.create_node("a", NodeArgs::default()).unwrap();
        assert!(g.add_edge(Edge::new("a", "ghost")).is_err());
        g.create_node("ghost", NodeArgs::default()).unwrap();
        g.add_edge(Edge::new("a", "ghost")).unwrap();
    }

    #[test]
    fn test_lenient_dangling_edge_retrievable() {
        let mut g = Graph::default();
        g.create_edge("src", "dst", EdgeArgs::default()).unwrap();
        let edge = g.get_edge(&"src:::dst".into()).unwrap();
        assert_eq!(edge.source().as_str(), "src");
        assert_eq!(ids(g.dangling_edges()), vec!["src:::dst"]);
    }

    #[test]
    fn test_get_missing_messages() {
        let g = Graph::default();
        assert_eq!(
            g.get_node(&"x".into()).unwrap_err().to_string(),
            "Unable to find node with id: x"
        );
        assert_eq!(
            g.get_edge(&"x:::y".into()).unwrap_err().to_string(),
            "Unable to find edge with id: x:::y"
        );
        assert!(g.maybe_get_node(&"x".into()).is_none());
        assert!(g.maybe_get_edge(&"x:::y".into()).is_none());
    }

    #[test]
    fn test_create_if_missing_is_idempotent() {
        let mut g = Graph::default();
        g.create_node_if_missing("n", NodeArgs::labeled("kept")).unwrap();
        let node = g
            .create_node_if_missing("n", NodeArgs::labeled("ignored"))
            .unwrap();
        assert_eq!(node.label(), Some("kept"));

        g.create_edge_if_missing("n", "m", EdgeArgs::typed("first"))
            .unwrap();
        let edge = g
            .create_edge_if_missing("n", "m", EdgeArgs::typed("second"))
            .unwrap();
        assert_eq!(edge.entity_type(), "first");
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_remove_node_keeps_edges() {
        let mut g = chain(false);
        g.remove_node(&"b".into()).unwrap();
        assert!(!g.contains_node(&"b".into()));
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.dangling_edges().len(), 2);
    }

    #[test]
    fn test_remove_by_mode() {
        let mut lenient = Graph::default();
        assert!(lenient.remove_node(&"x".into()).unwrap().is_none());
        assert!(lenient.remove_edge(&"x:::y".into()).unwrap().is_none());

        let mut strict = Graph::new(GraphOptions::strict());
        assert!(strict.remove_node(&"x".into()).is_err());
        assert!(strict.remove_edge(&"x:::y".into()).is_err());
    }

    #[test]
    fn test_remove_node_and_edges() {
        let mut g = chain(true);
        let (node, edges) = g.remove_node_and_edges(&"b".into()).unwrap();
        assert!(node.is_some());
        assert_eq!(edges.len(), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(g.remove_node_and_edges(&"b".into()).is_err());
    }

    #[test]
    fn test_adjacency_queries() {
        let mut g = chain(false);
        g.create_edge("c", "a", EdgeArgs::default()).unwrap();

        assert_eq!(ids(g.edges_to(&"b".into())), vec!["a:::b"]);
        assert_eq!(ids(g.edges_from(&"b".into())), vec!["b:::c"]);
        assert_eq!(
            ids(g.edges_connected_to([&NodeId::from("a")])),
            vec!["a:::b", "c:::a"]
        );
        let both = [NodeId::from("a"), NodeId::from("b")];
        assert_eq!(g.edges_connected_to(&both).len(), 3);

        let set: EntityIds<NodeId> = ["a", "b"].into_iter().map(NodeId::from).collect();
        assert_eq!(ids(g.edges_connecting(&set)), vec!["a:::b"]);
    }

    #[test]
    fn test_graph_map() {
        let g = chain(false);
        let map = g.graph_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map[&NodeId::from("a")], vec![NodeId::from("b")]);
        assert!(map[&NodeId::from("c")].is_empty());
    }

    #[test]
    fn test_tag_and_type_lookup() {
        let mut g = Graph::default();
        g.create_node(
            "a",
            NodeArgs {
                entity_type: Some("concept".into()),
                tags: vec!["core".into()],
                ..Default::default()
            },
        )
        .unwrap();
        g.create_node("b", NodeArgs::typed("concept")).unwrap();
        g.create_edge(
            "a",
            "b",
            EdgeArgs {
                tags: vec!["link".into()],
                ..EdgeArgs::typed("rel")
            },
        )
        .unwrap();

        assert_eq!(g.nodes_by_type("concept").len(), 2);
        assert_eq!(g.nodes_by_tag("core").len(), 1);
        assert_eq!(g.edges_by_type("rel").len(), 1);
        assert_eq!(g.edges_by_tag("link").len(), 1);
    }

    #[test]
    fn test_tag_index_after_removal() {
        let mut g = Graph::default();
        for id in ["n1", "n2", "n3"] {
            g.create_node(
                id,
                NodeArgs {
                    tags: vec!["shared".into(), format!("own-{id}")],
                    ..Default::default()
                },
            )
            .unwrap();
        }
        g.remove_node(&"n2".into()).unwrap();
        let tagged: Vec<&str> = g
            .nodes_by_tag("shared")
            .into_iter()
            .map(|n| n.id().as_str())
            .collect();
        assert_eq!(tagged, vec!["n1", "n3"]);
        assert!(g.nodes_by_tag("own-n2").is_empty());
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn test_subgraph_is_induced_and_independent() {
        let g = chain(false);
        let keep: EntityIds<NodeId> = ["a", "b"].into_iter().map(NodeId::from).collect();
        let mut sub = g.subgraph(&keep);
        assert_eq!(sub.node_count(), 2);
        assert_eq!(ids(sub.edges().iter().collect()), vec!["a:::b"]);

        sub.update_node(&"a".into(), |n| n.meta.label = Some("changed".into()))
            .unwrap();
        assert!(g.get_node(&"a".into()).unwrap().label().is_none());
    }

    #[test]
    fn test_serde_roundtrip_keeps_strictness() {
        let g = chain(true);
        let json = serde_json::to_string(&g).unwrap();
        let parsed: Graph = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_strict());
        assert_eq!(parsed.node_count(), 3);
        assert_eq!(parsed.edge_count(), 2);
        assert!(parsed.nodes().is_strict());
        parsed.validate().unwrap();
    }

    #[test]
    fn test_validate_reports_dangling_edges_when_strict() {
        let json = r#"{
            "strict": true,
            "nodes": [{ "id": "a" }],
            "edges": [{ "source": "a", "target": "ghost" }]
        }"#;
        let parsed: Graph = serde_json::from_str(json).unwrap();
        assert!(parsed.is_strict());
        assert_eq!(
            parsed.validate().unwrap_err(),
            GraphError::InvalidReference {
                from: "a".into(),
                to: "ghost".into(),
            }
        );

        let lenient: Graph = serde_json::from_str(&json.replace("true", "false")).unwrap();
        lenient.validate().unwrap();
    }
}
