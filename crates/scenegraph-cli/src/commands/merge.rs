use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scenegraph_core::GraphOptions;
use scenegraph_query::merge_scene_graph;

use crate::document::{load_scene, save_scene};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct MergeArgs {
    /// Document merged into
    pub a: PathBuf,

    /// Document merged from; wins on id collisions
    pub b: PathBuf,

    /// Write the merged scene graph here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &MergeArgs, options: GraphOptions, format: OutputFormat) -> Result<()> {
    let mut a = load_scene(&args.a, options)?;
    let b = load_scene(&args.b, options)?;

    let report = merge_scene_graph(&mut a, &b).with_context(|| {
        format!(
            "Failed to merge {} into {}",
            args.b.display(),
            args.a.display()
        )
    })?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "report": report,
                "nodes": a.graph().node_count(),
                "edges": a.graph().edge_count(),
                "output": args.output.as_ref().map(|p| p.display().to_string()),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            println!(
                "Nodes: {} added, {} replaced",
                report.nodes_added, report.nodes_replaced
            );
            println!(
                "Edges: {} added, {} replaced",
                report.edges_added, report.edges_replaced
            );
            println!(
                "Result: {} nodes, {} edges",
                a.graph().node_count(),
                a.graph().edge_count()
            );
        }
    }

    if let Some(output) = &args.output {
        save_scene(output, &a)?;
    }

    Ok(())
}
