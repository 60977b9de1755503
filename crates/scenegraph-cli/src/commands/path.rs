use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use scenegraph_core::{GraphOptions, NodeId};
use scenegraph_query::shortest_path;

use crate::document::load_scene;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct PathArgs {
    /// Scene graph document (JSON)
    pub file: PathBuf,

    /// Start node id
    pub from: String,

    /// End node id
    pub to: String,
}

pub fn run(args: &PathArgs, options: GraphOptions, format: OutputFormat) -> Result<()> {
    let scene = load_scene(&args.file, options)?;
    let from = NodeId::from(args.from.as_str());
    let to = NodeId::from(args.to.as_str());

    let path = shortest_path(scene.graph(), &from, &to);

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "from": from,
                "to": to,
                "found": !path.is_empty(),
                "hops": path.len().saturating_sub(1),
                "path": path,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            if path.is_empty() {
                println!("No path from {from} to {to}");
            } else {
                let hops: Vec<&str> = path.iter().map(NodeId::as_str).collect();
                println!("{}", hops.join(" -> "));
                println!("({} hops)", path.len() - 1);
            }
        }
    }

    Ok(())
}
