use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use scenegraph_core::{Graph, GraphOptions, SceneGraph};

/// Read a scene graph document.
///
/// When `options` or the document itself asks for strict mode, the graph is
/// rebuilt node by node under strict rules so that dangling edges are
/// rejected at load time instead of surfacing later.
pub fn load_scene(path: &Path, options: GraphOptions) -> Result<SceneGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let scene: SceneGraph = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse scene graph {}", path.display()))?;

    if !(options.strict || scene.graph().is_strict()) {
        tracing::debug!(
            path = %path.display(),
            nodes = scene.graph().node_count(),
            edges = scene.graph().edge_count(),
            "loaded scene"
        );
        return Ok(scene);
    }

    let (metadata, graph, display) = scene.into_parts();
    let mut checked = Graph::new(GraphOptions::strict());
    for node in graph.nodes() {
        checked.add_node(node.clone())?;
    }
    for edge in graph.edges() {
        checked
            .add_edge(edge.clone())
            .with_context(|| format!("Invalid edge in {}", path.display()))?;
    }
    tracing::debug!(
        path = %path.display(),
        nodes = checked.node_count(),
        edges = checked.edge_count(),
        "loaded scene (strict)"
    );
    Ok(SceneGraph::from_parts(metadata, checked, display))
}

pub fn save_scene(path: &Path, scene: &SceneGraph) -> Result<()> {
    let json = serde_json::to_string_pretty(scene).context("Failed to serialize scene graph")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote scene");
    Ok(())
}
