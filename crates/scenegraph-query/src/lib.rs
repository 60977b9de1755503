pub mod degree;
pub mod diff;
pub mod error;
pub mod filter;
pub mod merge;
pub mod path;
pub mod reachability;
pub mod render;

pub use degree::{edges_to_degree, DegreeExpansion};
pub use diff::{get_diff, GraphDiff};
pub use error::QueryError;
pub use filter::{
    filter_graph, filter_node_ids, filter_nodes, FilterConditions, FilterOperator,
    FilterRuleDefinition, FilterRuleMode,
};
pub use merge::{merge_graph, merge_scene_graph, MergeReport};
pub use path::{compute_path, shortest_path};
pub use reachability::{
    downstream_nodes, entire_path, reachable, upstream_nodes, Direction, EntirePath,
};
pub use render::to_dot;
