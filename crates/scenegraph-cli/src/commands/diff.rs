use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use scenegraph_core::GraphOptions;
use scenegraph_query::get_diff;

use crate::document::load_scene;
use crate::output::format::format_diff;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct DiffArgs {
    /// Base document
    pub a: PathBuf,

    /// Document to compare against the base
    pub b: PathBuf,
}

pub fn run(args: &DiffArgs, options: GraphOptions, format: OutputFormat) -> Result<()> {
    let a = load_scene(&args.a, options)?;
    let b = load_scene(&args.b, options)?;

    let diff = get_diff(a.graph(), b.graph());
    let output = format_diff(&diff, format);
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
