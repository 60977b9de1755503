use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scenegraph_core::{Entity, GraphOptions, SceneGraph};
use scenegraph_query::{filter_graph, FilterRuleDefinition};

use crate::document::{load_scene, save_scene};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct FilterArgs {
    /// Scene graph document (JSON)
    pub file: PathBuf,

    /// JSON array of filter rules
    pub rules: PathBuf,

    /// Write the filtered scene graph here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &FilterArgs, options: GraphOptions, format: OutputFormat) -> Result<()> {
    let scene = load_scene(&args.file, options)?;
    let raw = fs::read_to_string(&args.rules)
        .with_context(|| format!("Failed to read {}", args.rules.display()))?;
    let rules: Vec<FilterRuleDefinition> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse filter rules {}", args.rules.display()))?;

    let filtered = filter_graph(scene.graph(), &rules);
    let total = scene.graph().node_count();

    match format {
        OutputFormat::Json => {
            let kept: Vec<&str> = filtered.nodes().iter().map(|n| n.id().as_str()).collect();
            let json = serde_json::json!({
                "rules": rules.len(),
                "total": total,
                "kept": kept,
                "edges": filtered.edge_count(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            println!(
                "Kept {} of {} nodes ({} edges)",
                filtered.node_count(),
                total,
                filtered.edge_count()
            );
            for node in filtered.nodes() {
                println!("  {}", node.id());
            }
        }
    }

    if let Some(output) = &args.output {
        let out = SceneGraph::from_parts(
            scene.metadata.clone(),
            filtered,
            scene.display_config().clone(),
        );
        save_scene(output, &out)?;
    }

    Ok(())
}
