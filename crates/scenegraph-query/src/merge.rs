use scenegraph_core::{Graph, SceneGraph};
use serde::Serialize;

use crate::error::QueryError;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    pub nodes_added: usize,
    pub nodes_replaced: usize,
    pub edges_added: usize,
    pub edges_replaced: usize,
}

impl MergeReport {
    pub fn is_noop(&self) -> bool {
        self.nodes_added + self.nodes_replaced + self.edges_added + self.edges_replaced == 0
    }
}

/// Copy every node and edge of `b` into `a`. On an id collision `b`'s copy
/// replaces `a`'s, regardless of `a`'s strictness.
///
/// Edges are copied as-is, so an edge of `b` whose endpoint exists in
/// neither graph stays dangling; a strict `a` then fails validation. The
/// merge runs on a copy of `a`, which is left untouched on failure.
pub fn merge_graph(a: &mut Graph, b: &Graph) -> Result<MergeReport, QueryError> {
    let mut merged = a.deep_copy();
    let mut report = MergeReport::default();

    for node in b.nodes() {
        match merged.add_node_safe(node.clone()) {
            Some(_) => report.nodes_replaced += 1,
            None => report.nodes_added += 1,
        }
    }
    for edge in b.edges() {
        match merged.add_edge_safe(edge.clone()) {
            Some(_) => report.edges_replaced += 1,
            None => report.edges_added += 1,
        }
    }

    merged
        .validate()
        .map_err(|e| QueryError::Merge(e.to_string()))?;
    *a = merged;

    tracing::debug!(
        nodes_added = report.nodes_added,
        nodes_replaced = report.nodes_replaced,
        edges_added = report.edges_added,
        edges_replaced = report.edges_replaced,
        "merged graph"
    );
    Ok(report)
}

/// Merge `b`'s graph and display config into `a`.
///
/// Display entries present on both sides are reconciled per key, and any
/// type or tag the merged graph introduces gets a default entry.
pub fn merge_scene_graph(a: &mut SceneGraph, b: &SceneGraph) -> Result<MergeReport, QueryError> {
    let report = merge_graph(a.graph_mut(), b.graph())?;
    let display = a.display_config().merge(b.display_config());
    *a.display_config_mut() = display;
    a.refresh_display_config();
    Ok(report)
}
