use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use scenegraph_core::{GraphOptions, NodeId};
use scenegraph_query::{reachable, Direction};

use crate::document::load_scene;
use crate::output::format::format_id_lists;
use crate::output::OutputFormat;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReachDirection {
    Up,
    Down,
    Both,
}

impl From<ReachDirection> for Direction {
    fn from(d: ReachDirection) -> Self {
        match d {
            ReachDirection::Up => Direction::Upstream,
            ReachDirection::Down => Direction::Downstream,
            ReachDirection::Both => Direction::Both,
        }
    }
}

#[derive(Args)]
pub struct ReachArgs {
    /// Scene graph document (JSON)
    pub file: PathBuf,

    /// Seed node ids
    #[arg(required = true)]
    pub nodes: Vec<String>,

    /// Which way to follow edges
    #[arg(long, value_enum, default_value = "both")]
    pub direction: ReachDirection,
}

pub fn run(args: &ReachArgs, options: GraphOptions, format: OutputFormat) -> Result<()> {
    let scene = load_scene(&args.file, options)?;
    let seeds: Vec<NodeId> = args.nodes.iter().map(|s| NodeId::from(s.as_str())).collect();

    let result = reachable(&seeds, scene.graph(), args.direction.into());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            print!("{}", format_id_lists(&result.nodes, &result.edges));
        }
    }

    Ok(())
}
