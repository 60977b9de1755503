use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scenegraph_core::{GraphOptions, NodeId};
use scenegraph_query::edges_to_degree;

use crate::document::load_scene;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct NeighborsArgs {
    /// Scene graph document (JSON)
    pub file: PathBuf,

    /// Center node id
    pub node: String,

    /// Number of rings to expand
    #[arg(long, default_value = "1")]
    pub degree: usize,
}

pub fn run(args: &NeighborsArgs, options: GraphOptions, format: OutputFormat) -> Result<()> {
    let scene = load_scene(&args.file, options)?;
    let graph = scene.graph();
    let center = NodeId::from(args.node.as_str());
    graph
        .get_node(&center)
        .with_context(|| format!("Cannot expand around '{}'", args.node))?;

    let expansion = edges_to_degree(&center, args.degree, graph);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&expansion)?);
        }
        OutputFormat::Text => {
            if expansion.edge_count() == 0 {
                println!("No edges around {center}");
                return Ok(());
            }
            for (degree, edges) in &expansion.degrees_to_edges {
                println!("Degree {degree} ({}):", edges.len());
                for id in edges {
                    println!("  {id}");
                }
            }
        }
    }

    Ok(())
}
