use scenegraph_core::{Edge, EdgeId, Entity, EntityIds, EntityMeta, Graph, Node, NodeId};
use scenegraph_query::GraphDiff;

use super::OutputFormat;

pub fn format_node_full(node: &Node, graph: &Graph, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "node": node,
                "incoming": edge_ids(graph.edges_to(node.id())),
                "outgoing": edge_ids(graph.edges_from(node.id())),
            });
            serde_json::to_string_pretty(&json).unwrap_or_default()
        }
        OutputFormat::Text => format_node_full_text(node, graph),
    }
}

fn format_node_full_text(node: &Node, graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str(&format!("Node:  {}\n", node.id()));
    push_meta(&mut out, &node.meta);

    let p = node.display.position;
    out.push_str(&format!("Position: ({}, {}, {})\n", p.x, p.y, p.z));
    if !node.display.is_visible {
        out.push_str("Hidden\n");
    }

    let incoming = graph.edges_to(node.id());
    if !incoming.is_empty() {
        out.push_str(&format!("\n--- Incoming ({}) ---\n", incoming.len()));
        for edge in incoming {
            out.push_str(&format!("  {} {}\n", edge.source(), bracketed_type(edge)));
        }
    }
    let outgoing = graph.edges_from(node.id());
    if !outgoing.is_empty() {
        out.push_str(&format!("\n--- Outgoing ({}) ---\n", outgoing.len()));
        for edge in outgoing {
            out.push_str(&format!("  {} {}\n", edge.target(), bracketed_type(edge)));
        }
    }
    out
}

pub fn format_edge_full(edge: &Edge, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(edge).unwrap_or_default(),
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("Edge:  {}\n", edge.id()));
            out.push_str(&format!("From:  {}\n", edge.source()));
            out.push_str(&format!("To:    {}\n", edge.target()));
            push_meta(&mut out, &edge.meta);
            out
        }
    }
}

fn push_meta(out: &mut String, meta: &EntityMeta) {
    if let Some(label) = &meta.label {
        out.push_str(&format!("Label: {label}\n"));
    }
    if !meta.entity_type.is_empty() {
        out.push_str(&format!("Type:  {}\n", meta.entity_type));
    }
    if !meta.tags.is_empty() {
        let tags: Vec<&str> = meta.tags.iter().map(String::as_str).collect();
        out.push_str(&format!("Tags:  {}\n", tags.join(", ")));
    }
    if let Some(description) = &meta.description {
        out.push_str(&format!("\n{description}\n"));
    }
    if !meta.user_data.is_empty() {
        let keys: Vec<&str> = meta.user_data.keys().map(String::as_str).collect();
        out.push_str(&format!("User data: {}\n", keys.join(", ")));
    }
}

fn bracketed_type(edge: &Edge) -> String {
    if edge.entity_type().is_empty() {
        String::new()
    } else {
        format!("[{}]", edge.entity_type())
    }
}

fn edge_ids(edges: Vec<&Edge>) -> Vec<&str> {
    edges.into_iter().map(|e| e.id().as_str()).collect()
}

pub fn format_id_lists(nodes: &EntityIds<NodeId>, edges: &EntityIds<EdgeId>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Nodes ({}):\n", nodes.len()));
    for id in nodes {
        out.push_str(&format!("  {id}\n"));
    }
    out.push_str(&format!("Edges ({}):\n", edges.len()));
    for id in edges {
        out.push_str(&format!("  {id}\n"));
    }
    out
}

pub fn format_diff(diff: &GraphDiff, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(diff).unwrap_or_default(),
        OutputFormat::Text => format_diff_text(diff),
    }
}

fn format_diff_text(diff: &GraphDiff) -> String {
    if diff.is_empty() {
        return "No differences.\n".to_string();
    }

    let mut out = String::new();
    for node in &diff.missing_nodes {
        out.push_str(&format!("- node {}\n", node.id()));
    }
    for node in &diff.additional_nodes {
        out.push_str(&format!("+ node {}\n", node.id()));
    }
    for edge in &diff.missing_edges {
        out.push_str(&format!("- edge {} -> {}\n", edge.source(), edge.target()));
    }
    for edge in &diff.additional_edges {
        out.push_str(&format!("+ edge {} -> {}\n", edge.source(), edge.target()));
    }
    out.push_str(&format!(
        "\nNodes: -{} +{}  Edges: -{} +{}\n",
        diff.missing_nodes.len(),
        diff.additional_nodes.len(),
        diff.missing_edges.len(),
        diff.additional_edges.len()
    ));
    out
}
