use anyhow::Result;
use clap::Parser;
use scenegraph_core::GraphOptions;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod document;
mod output;

#[derive(Parser)]
#[command(
    name = "scenegraph",
    version,
    about = "Inspect, query, diff and merge scene graph documents"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: output::OutputFormat,

    /// Load documents under strict rules: edges must reference existing nodes
    #[arg(long, global = true, env = "SCENEGRAPH_STRICT")]
    strict: bool,

    #[command(subcommand)]
    command: commands::Commands,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = GraphOptions { strict: cli.strict };
    match &cli.command {
        commands::Commands::Stats(args) => commands::stats::run(args, options, cli.format),
        commands::Commands::Show(args) => commands::show::run(args, options, cli.format),
        commands::Commands::Path(args) => commands::path::run(args, options, cli.format),
        commands::Commands::Neighbors(args) => commands::neighbors::run(args, options, cli.format),
        commands::Commands::Reach(args) => commands::reach::run(args, options, cli.format),
        commands::Commands::Filter(args) => commands::filter::run(args, options, cli.format),
        commands::Commands::Diff(args) => commands::diff::run(args, options, cli.format),
        commands::Commands::Merge(args) => commands::merge::run(args, options, cli.format),
        commands::Commands::Dot(args) => commands::dot::run(args, options),
    }
}
