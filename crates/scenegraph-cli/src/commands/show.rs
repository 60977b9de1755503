use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use scenegraph_core::{EdgeId, GraphOptions, NodeId};

use crate::document::load_scene;
use crate::output::format::{format_edge_full, format_node_full};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ShowArgs {
    /// Scene graph document (JSON)
    pub file: PathBuf,

    /// Node id, or edge id ("source:::target")
    pub id: String,
}

pub fn run(args: &ShowArgs, options: GraphOptions, format: OutputFormat) -> Result<()> {
    let scene = load_scene(&args.file, options)?;
    let graph = scene.graph();

    let output = if let Some(node) = graph.maybe_get_node(&NodeId::from(args.id.as_str())) {
        format_node_full(node, graph, format)
    } else if let Some(edge) = graph.maybe_get_edge(&EdgeId::from(args.id.as_str())) {
        format_edge_full(edge, format)
    } else {
        anyhow::bail!("No node or edge with id '{}'", args.id);
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
