use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{Entity, EntityMeta};
use super::ids::NodeId;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Rendering attributes carried by a node. The core stores them but never
/// interprets them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDisplay {
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

fn visible_by_default() -> bool {
    true
}

impl Default for NodeDisplay {
    fn default() -> Self {
        Self {
            position: Position::default(),
            dimensions: None,
            is_visible: true,
            color: None,
            size: None,
            opacity: None,
        }
    }
}

/// A vertex. Adjacency is derived from the edge container, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    id: NodeId,
    #[serde(flatten)]
    pub meta: EntityMeta,
    #[serde(flatten)]
    pub display: NodeDisplay,
}

impl Node {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            meta: EntityMeta::default(),
            display: NodeDisplay::default(),
        }
    }

    pub fn from_args(id: impl Into<NodeId>, args: NodeArgs) -> Self {
        let mut node = Self::new(id);
        node.meta = EntityMeta {
            entity_type: args.entity_type.unwrap_or_default(),
            tags: args.tags.into_iter().collect(),
            label: args.label,
            description: args.description,
            user_data: args.user_data,
        };
        if let Some(position) = args.position {
            node.display.position = position;
        }
        node.display.dimensions = args.dimensions;
        node.display.is_visible = args.is_visible.unwrap_or(true);
        node.display.color = args.color;
        node.display.size = args.size;
        node.display.opacity = args.opacity;
        node
    }

    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.display.position = Position { x, y, z };
        self
    }
}

impl Entity for Node {
    type Id = NodeId;
    const KIND: &'static str = "node";

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}

/// Construction inputs for [`Graph::create_node`](crate::graph::Graph::create_node).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeArgs {
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
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub opacity: Option<f64>,
}

impl NodeArgs {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn typed(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: Some(entity_type.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args() {
        let node = Node::from_args(
            "n1",
            NodeArgs {
                label: Some("First".into()),
                entity_type: Some("concept".into()),
                tags: vec!["a".into(), "b".into(), "a".into()],
                position: Some(Position {
                    x: 1.0,
                    y: 2.0,
                    z: 3.0,
                }),
                ..Default::default()
            },
        );
        assert_eq!(node.id().as_str(), "n1");
        assert_eq!(node.label(), Some("First"));
        assert_eq!(node.entity_type(), "concept");
        assert_eq!(node.tags().len(), 2);
        assert_eq!(node.display.position.z, 3.0);
        assert!(node.display.is_visible);
    }

    #[test]
    fn test_builder_chain() {
        let node = Node::new("n2")
            .with_type("storyCard")
            .with_tag("draft")
            .with_user_data("score", serde_json::json!(7));
        assert!(node.has_tag("draft"));
        assert_eq!(node.meta.user_data["score"], 7);
        assert_eq!(node.display_name(), "n2");
    }

    #[test]
    fn test_node_serde_roundtrip() {
        let node = Node::new("n3")
            .with_label("Three")
            .with_type("concept")
            .with_position(4.0, 5.0, 0.0);
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"type\":\"concept\""));
        let parsed: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node, parsed);
    }

    #[test]
    fn test_visible_defaults_when_missing() {
        let node: Node = serde_json::from_str(r#"{"id":"n4"}"#).unwrap();
        assert!(node.display.is_visible);
        assert_eq!(node.entity_type(), "");
    }
}
