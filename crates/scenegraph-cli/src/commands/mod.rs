pub mod diff;
pub mod dot;
pub mod filter;
pub mod merge;
pub mod neighbors;
pub mod path;
pub mod reach;
pub mod show;
pub mod stats;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Show node/edge counts and the type and tag breakdown
    Stats(stats::StatsArgs),
    /// Show a single node or edge
    Show(show::ShowArgs),
    /// Find a shortest directed path between two nodes
    Path(path::PathArgs),
    /// List edges around a node by ring distance
    Neighbors(neighbors::NeighborsArgs),
    /// Upstream/downstream closure of a set of nodes
    Reach(reach::ReachArgs),
    /// Apply include/exclude filter rules
    Filter(filter::FilterArgs),
    /// Compare the node and edge sets of two documents
    Diff(diff::DiffArgs),
    /// Merge the second document into the first
    Merge(merge::MergeArgs),
    /// Output Graphviz DOT
    Dot(dot::DotArgs),
}
