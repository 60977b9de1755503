//! Rendering configuration keyed by entity type or tag.
//!
//! The graph never reads this; renderers do. The core only seeds it from a
//! graph and merges two of them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::model::{Edge, Entity, Node};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            color: None,
            is_visible: true,
        }
    }
}

impl RenderingConfig {
    pub fn colored(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            is_visible: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            color: None,
            is_visible: false,
        }
    }

    /// Visibility is AND-ed; the first non-empty color wins.
    pub fn merge(&self, other: &RenderingConfig) -> RenderingConfig {
        let color = match self.color.as_deref() {
            Some(c) if !c.is_empty() => Some(c.to_string()),
            _ => other.color.clone().filter(|c| !c.is_empty()),
        };
        RenderingConfig {
            color,
            is_visible: self.is_visible && other.is_visible,
        }
    }
}

pub type RenderingConfigMap = IndexMap<String, RenderingConfig>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    #[serde(default)]
    pub node_config: RenderingConfigMap,
    #[serde(default)]
    pub edge_config: RenderingConfigMap,
}

impl DisplayConfig {
    /// One visible, uncolored entry for every type and tag in `graph`.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut config = Self::default();
        config.register_graph(graph);
        config
    }

    /// Add default entries for types/tags not yet configured. Returns how
    /// many keys were added.
    pub fn register_graph(&mut self, graph: &Graph) -> usize {
        let before = self.node_config.len() + self.edge_config.len();
        let nodes = graph.nodes();
        for key in nodes.types().chain(nodes.tags()) {
            self.node_config.entry(key.to_string()).or_default();
        }
        let edges = graph.edges();
        for key in edges.types().chain(edges.tags()) {
            self.edge_config.entry(key.to_string()).or_default();
        }
        self.node_config.len() + self.edge_config.len() - before
    }

    /// Per-key merge. Keys only present in `other` are appended.
    pub fn merge(&self, other: &DisplayConfig) -> DisplayConfig {
        DisplayConfig {
            node_config: merge_maps(&self.node_config, &other.node_config),
            edge_config: merge_maps(&self.edge_config, &other.edge_config),
        }
    }

    pub fn is_node_visible(&self, node: &Node) -> bool {
        node.display.is_visible && is_visible_in(&self.node_config, node)
    }

    pub fn is_edge_visible(&self, edge: &Edge) -> bool {
        is_visible_in(&self.edge_config, edge)
    }

    /// The node's own color wins over any configured type or tag color.
    pub fn node_color<'a>(&'a self, node: &'a Node) -> Option<&'a str> {
        node.display
            .color
            .as_deref()
            .or_else(|| color_in(&self.node_config, node))
    }

    pub fn edge_color(&self, edge: &Edge) -> Option<&str> {
        color_in(&self.edge_config, edge)
    }
}

fn merge_maps(left: &RenderingConfigMap, right: &RenderingConfigMap) -> RenderingConfigMap {
    let mut merged: RenderingConfigMap = left
        .iter()
        .map(|(key, config)| {
            let config = match right.get(key) {
                Some(theirs) => config.merge(theirs),
                None => config.clone(),
            };
            (key.clone(), config)
        })
        .collect();
    for (key, config) in right {
        merged.entry(key.clone()).or_insert_with(|| config.clone());
    }
    merged
}

/// Hidden if the type entry or any tag entry is hidden.
fn is_visible_in<E: Entity>(map: &RenderingConfigMap, entity: &E) -> bool {
    let type_visible = map
        .get(entity.entity_type())
        .map_or(true, |c| c.is_visible);
    type_visible
        && entity
            .tags()
            .iter()
            .all(|tag| map.get(tag).map_or(true, |c| c.is_visible))
}

/// Type entry color first, then the first tag entry with a color.
fn color_in<'a, E: Entity>(map: &'a RenderingConfigMap, entity: &E) -> Option<&'a str> {
    let configured = |key: &str| {
        map.get(key)
            .and_then(|c| c.color.as_deref())
            .filter(|c| !c.is_empty())
    };
    configured(entity.entity_type()).or_else(|| entity.tags().iter().find_map(|t| configured(t)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeArgs, NodeArgs};

    fn sample_graph() -> Graph {
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
        g.create_node("b", NodeArgs::typed("event")).unwrap();
        g.create_edge("a", "b", EdgeArgs::typed("causes")).unwrap();
        g
    }

    #[test]
    fn test_from_graph_seeds_keys() {
        let config = DisplayConfig::from_graph(&sample_graph());
        let node_keys: Vec<&str> = config.node_config.keys().map(String::as_str).collect();
        assert_eq!(node_keys, vec!["concept", "event", "core"]);
        assert!(config.edge_config.contains_key("causes"));
        assert!(config.node_config.values().all(|c| c.is_visible));
    }

    #[test]
    fn test_register_graph_keeps_existing_entries() {
        let mut config = DisplayConfig::default();
        config
            .node_config
            .insert("concept".into(), RenderingConfig::colored("#ff0000"));
        let added = config.register_graph(&sample_graph());
        assert_eq!(added, 3);
        assert_eq!(config.node_config["concept"].color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_merge_visibility_and_color() {
        let mut left = DisplayConfig::default();
        left.node_config.insert(
            "a".into(),
            RenderingConfig {
                color: Some(String::new()),
                is_visible: true,
            },
        );
        left.node_config
            .insert("b".into(), RenderingConfig::colored("red"));

        let mut right = DisplayConfig::default();
        right.node_config.insert(
            "a".into(),
            RenderingConfig {
                color: Some("blue".into()),
                is_visible: false,
            },
        );
        right
            .node_config
            .insert("b".into(), RenderingConfig::colored("green"));
        right
            .node_config
            .insert("c".into(), RenderingConfig::hidden());

        let merged = left.merge(&right);
        assert_eq!(merged.node_config["a"].color.as_deref(), Some("blue"));
        assert!(!merged.node_config["a"].is_visible);
        assert_eq!(merged.node_config["b"].color.as_deref(), Some("red"));
        assert!(merged.node_config["b"].is_visible);
        assert!(!merged.node_config["c"].is_visible);
        assert_eq!(merged.node_config.len(), 3);
    }

    #[test]
    fn test_visibility_rules() {
        let g = sample_graph();
        let mut config = DisplayConfig::from_graph(&g);
        let a = g.get_node(&"a".into()).unwrap();
        let b = g.get_node(&"b".into()).unwrap();
        assert!(config.is_node_visible(a));

        config.node_config.insert("core".into(), RenderingConfig::hidden());
        assert!(!config.is_node_visible(a));
        assert!(config.is_node_visible(b));

        let edge = g.get_edge(&"a:::b".into()).unwrap();
        assert!(config.is_edge_visible(edge));
        config
            .edge_config
            .insert("causes".into(), RenderingConfig::hidden());
        assert!(!config.is_edge_visible(edge));
    }

    #[test]
    fn test_color_lookup() {
        let g = sample_graph();
        let mut config = DisplayConfig::from_graph(&g);
        let a = g.get_node(&"a".into()).unwrap();
        assert!(config.node_color(a).is_none());
        config
            .node_config
            .insert("core".into(), RenderingConfig::colored("#00ff00"));
        assert_eq!(config.node_color(a), Some("#00ff00"));
        config
            .node_config
            .insert("concept".into(), RenderingConfig::colored("#0000ff"));
        assert_eq!(config.node_color(a), Some("#0000ff"));
    }

    #[test]
    fn test_node_color_prefers_own_display_color() {
        let mut g = sample_graph();
        g.update_node(&"a".into(), |n| n.display.color = Some("#123456".into()))
            .unwrap();
        let mut config = DisplayConfig::from_graph(&g);
        config
            .node_config
            .insert("concept".into(), RenderingConfig::colored("#0000ff"));

        let a = g.get_node(&"a".into()).unwrap();
        let b = g.get_node(&"b".into()).unwrap();
        assert_eq!(config.node_color(a), Some("#123456"));
        assert!(config.node_color(b).is_none());
    }
}
