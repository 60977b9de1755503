use scenegraph_core::{DisplayConfig, Entity, Graph};

/// Graphviz DOT for `graph`.
///
/// Node labels fall back to the node id and edge labels are the edge type.
/// When `display` is given, hidden nodes and edges are left out (an edge is
/// also dropped when either endpoint is hidden) and configured colors are
/// emitted.
pub fn to_dot(graph: &Graph, display: Option<&DisplayConfig>) -> String {
    let mut dot = String::from("digraph scenegraph {\n  rankdir=LR;\n");

    for node in graph.nodes() {
        if display.is_some_and(|d| !d.is_node_visible(node)) {
            continue;
        }
        let mut attrs = format!("label=\"{}\"", escape(&node.display_name()));
        if let Some(color) = display.and_then(|d| d.node_color(node)) {
            attrs.push_str(&format!(" color=\"{}\"", escape(color)));
        }
        dot.push_str(&format!("  \"{}\" [{}];\n", escape(node.id().as_str()), attrs));
    }

    for edge in graph.edges() {
        if let Some(d) = display {
            let endpoint_hidden = [edge.source(), edge.target()]
                .into_iter()
                .filter_map(|id| graph.maybe_get_node(id))
                .any(|n| !d.is_node_visible(n));
            if endpoint_hidden || !d.is_edge_visible(edge) {
                continue;
            }
        }
        let mut attrs = format!("label=\"{}\"", escape(edge.entity_type()));
        if let Some(color) = display.and_then(|d| d.edge_color(edge)) {
            attrs.push_str(&format!(" color=\"{}\"", escape(color)));
        }
        dot.push_str(&format!(
            "  \"{}\" -> \"{}\" [{}];\n",
            escape(edge.source().as_str()),
            escape(edge.target().as_str()),
            attrs
        ));
    }

    dot.push_str("}\n");
    dot
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
