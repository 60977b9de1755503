use std::collections::HashSet;

use scenegraph_core::{Entity, EntityIds, Graph, Node, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Include,
    Exclude,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FilterRuleMode {
    /// Match on type membership and tag overlap.
    TypesAndTags,
    /// Match on an explicit node id list.
    Entities,
    /// Match every node.
    Everything,
}

/// Conditions a rule checks. An empty list places no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterConditions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterRuleDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub operator: FilterOperator,
    pub rule_mode: FilterRuleMode,
    #[serde(default)]
    pub conditions: FilterConditions,
}

impl FilterRuleDefinition {
    pub fn types_and_tags<T, G>(operator: FilterOperator, types: T, tags: G) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        Self {
            id: None,
            operator,
            rule_mode: FilterRuleMode::TypesAndTags,
            conditions: FilterConditions {
                types: types.into_iter().map(Into::into).collect(),
                tags: tags.into_iter().map(Into::into).collect(),
                nodes: Vec::new(),
            },
        }
    }

    pub fn entities<I>(operator: FilterOperator, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
    {
        Self {
            id: None,
            operator,
            rule_mode: FilterRuleMode::Entities,
            conditions: FilterConditions {
                nodes: nodes.into_iter().map(Into::into).collect(),
                ..Default::default()
            },
        }
    }

    pub fn everything(operator: FilterOperator) -> Self {
        Self {
            id: None,
            operator,
            rule_mode: FilterRuleMode::Everything,
            conditions: FilterConditions::default(),
        }
    }

    /// Whether `node` satisfies every non-empty condition of this rule.
    ///
    /// `everything` matches unconditionally. In the other modes the type,
    /// tag and node-id conditions are AND-ed, whichever mode the rule
    /// declares.
    pub fn matches(&self, node: &Node) -> bool {
        if self.rule_mode == FilterRuleMode::Everything {
            return true;
        }
        let c = &self.conditions;
        let type_ok = c.types.is_empty() || c.types.iter().any(|t| t == node.entity_type());
        let tag_ok = c.tags.is_empty() || c.tags.iter().any(|t| node.has_tag(t));
        let node_ok = c.nodes.is_empty() || c.nodes.contains(node.id());
        type_ok && tag_ok && node_ok
    }
}

/// Apply include/exclude rules to `nodes`.
///
/// With no include rules every node is a candidate; otherwise a node must
/// match at least one include rule. Any matching exclude rule then drops it.
/// The result keeps input order and lists each node once.
pub fn filter_nodes<'g>(
    nodes: impl IntoIterator<Item = &'g Node>,
    rules: &[FilterRuleDefinition],
) -> Vec<&'g Node> {
    let (include, exclude): (Vec<&FilterRuleDefinition>, Vec<&FilterRuleDefinition>) = rules
        .iter()
        .partition(|r| r.operator == FilterOperator::Include);

    let mut seen: HashSet<&NodeId> = HashSet::new();
    nodes
        .into_iter()
        .filter(|&n| include.is_empty() || include.iter().any(|r| r.matches(n)))
        .filter(|&n| !exclude.iter().any(|r| r.matches(n)))
        .filter(|&n| seen.insert(n.id()))
        .collect()
}

/// Ids of the nodes of `graph` that survive `rules`.
pub fn filter_node_ids(graph: &Graph, rules: &[FilterRuleDefinition]) -> EntityIds<NodeId> {
    filter_nodes(graph.nodes(), rules)
        .into_iter()
        .map(|n| n.id().clone())
        .collect()
}

/// Induced subgraph over the nodes that survive `rules`.
pub fn filter_graph(graph: &Graph, rules: &[FilterRuleDefinition]) -> Graph {
    let kept = filter_node_ids(graph, rules);
    tracing::debug!(
        rules = rules.len(),
        kept = kept.len(),
        total = graph.node_count(),
        "applied filter rules"
    );
    graph.subgraph(&kept)
}
