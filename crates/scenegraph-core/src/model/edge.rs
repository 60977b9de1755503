use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{Entity, EntityMeta};
use super::ids::{EdgeId, NodeId};

/// A directed `source -> target` relation.
///
/// The id is derived from the endpoints, so at most one edge exists per
/// ordered pair. Relationship kinds between the same pair go in `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawEdge")]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

/// Wire shape of an edge. Any serialized `id` is ignored and re-derived.
#[derive(Deserialize)]
struct RawEdge {
    source: NodeId,
    target: NodeId,
    #[serde(flatten)]
    meta: EntityMeta,
}

impl From<RawEdge> for Edge {
    fn from(raw: RawEdge) -> Self {
        let mut edge = Edge::new(raw.source, raw.target);
        edge.meta = raw.meta;
        edge
    }
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: EdgeId::between(&source, &target),
            source,
            target,
            meta: EntityMeta::default(),
        }
    }

    pub fn from_args(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        args: EdgeArgs,
    ) -> Self {
        let mut edge = Self::new(source, target);
        edge.meta = EntityMeta {
            entity_type: args.entity_type.unwrap_or_default(),
            tags: args.tags.into_iter().collect(),
            label: args.label,
            description: args.description,
            user_data: args.user_data,
        };
        edge
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    /// True if `node` is either endpoint.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }

    /// The opposite endpoint, or `None` if `node` is not on this edge.
    pub fn other_end(&self, node: &NodeId) -> Option<&NodeId> {
        if &self.source == node {
            Some(&self.target)
        } else if &self.target == node {
            Some(&self.source)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl Entity for Edge {
    type Id = EdgeId;
    const KIND: &'static str = "edge";

    fn id(&self) -> &EdgeId {
        &self.id
    }

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}

/// Construction inputs for [`Graph::create_edge`](crate::graph::Graph::create_edge).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EdgeArgs {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_data: Map<String, Value>,
}

impl EdgeArgs {
    pub fn typed(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: Some(entity_type.into()),
            ..Default::default()
        }
    }
}
