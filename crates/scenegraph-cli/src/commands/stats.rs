use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use scenegraph_core::{Entity, GraphOptions};

use crate::document::load_scene;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct StatsArgs {
    /// Scene graph document (JSON)
    pub file: PathBuf,
}

pub fn run(args: &StatsArgs, options: GraphOptions, format: OutputFormat) -> Result<()> {
    let scene = load_scene(&args.file, options)?;
    let graph = scene.graph();

    let mut node_types: BTreeMap<&str, usize> = BTreeMap::new();
    let mut node_tags: BTreeMap<&str, usize> = BTreeMap::new();
    for node in graph.nodes() {
        if !node.entity_type().is_empty() {
            *node_types.entry(node.entity_type()).or_default() += 1;
        }
        for tag in node.tags() {
            *node_tags.entry(tag.as_str()).or_default() += 1;
        }
    }
    let mut edge_types: BTreeMap<&str, usize> = BTreeMap::new();
    for edge in graph.edges() {
        if !edge.entity_type().is_empty() {
            *edge_types.entry(edge.entity_type()).or_default() += 1;
        }
    }
    let dangling = graph.dangling_edges().len();

    match format {
        OutputFormat::Json => {
            let stats = serde_json::json!({
                "name": scene.metadata.name,
                "strict": graph.is_strict(),
                "nodes": graph.node_count(),
                "edges": graph.edge_count(),
                "dangling_edges": dangling,
                "node_types": node_types,
                "node_tags": node_tags,
                "edge_types": edge_types,
                "updated_at": scene.metadata.updated_at,
            });
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Text => {
            println!("Scene: {}", scene.metadata.name);
            println!("Nodes:          {}", graph.node_count());
            println!("Edges:          {}", graph.edge_count());
            if dangling > 0 {
                println!("Dangling edges: {dangling}");
            }
            println!(
                "Updated:        {}",
                scene.metadata.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
            );

            for (title, counts) in [
                ("Node types", &node_types),
                ("Node tags", &node_tags),
                ("Edge types", &edge_types),
            ] {
                if counts.is_empty() {
                    continue;
                }
                println!();
                println!("{title}:");
                for (key, count) in counts {
                    println!("  {key}: {count}");
                }
            }
        }
    }

    Ok(())
}
