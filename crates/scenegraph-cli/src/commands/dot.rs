use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scenegraph_core::{EntityIds, GraphOptions, NodeId};
use scenegraph_query::{edges_to_degree, to_dot};

use crate::document::load_scene;

#[derive(Args)]
pub struct DotArgs {
    /// Scene graph document (JSON)
    pub file: PathBuf,

    /// Only render the neighborhood of this node
    #[arg(long)]
    pub node: Option<String>,

    /// Rings around --node to include
    #[arg(long, default_value = "2")]
    pub degree: usize,

    /// Ignore the display config (render hidden entities, no colors)
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: &DotArgs, options: GraphOptions) -> Result<()> {
    let scene = load_scene(&args.file, options)?;
    let full = scene.graph();

    let graph = if let Some(center) = &args.node {
        let center = NodeId::from(center.as_str());
        full.get_node(&center)
            .with_context(|| format!("Cannot render around '{center}'"))?;
        let expansion = edges_to_degree(&center, args.degree, full);
        let mut keep = EntityIds::new();
        keep.add(center);
        for edge_id in expansion.edges_to_degree.keys() {
            if let Some(edge) = full.maybe_get_edge(edge_id) {
                keep.add(edge.source().clone());
                keep.add(edge.target().clone());
            }
        }
        full.subgraph(&keep)
    } else {
        full.deep_copy()
    };

    let display = (!args.all).then_some(scene.display_config());
    print!("{}", to_dot(&graph, display));
    Ok(())
}
