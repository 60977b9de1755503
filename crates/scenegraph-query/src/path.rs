use std::collections::{HashSet, VecDeque};

use scenegraph_core::{Graph, GraphMap, NodeId};

/// A shortest path (by edge count) from `start` to `end`, inclusive.
///
/// - `start == end` yields `[start]` without looking at `adjacency`.
/// - An empty vec means no path, including when either id is not a key of
///   `adjacency`.
/// - Among equally short paths the first one discovered wins, which depends
///   on adjacency list order.
///
/// The queue holds whole path prefixes. A node is never enqueued twice, so
/// cycles terminate and no prefix revisits one of its own nodes.
pub fn compute_path(start: &NodeId, end: &NodeId, adjacency: &GraphMap) -> Vec<NodeId> {
    if start == end {
        return vec![start.clone()];
    }
    if !adjacency.contains_key(start) || !adjacency.contains_key(end) {
        return Vec::new();
    }

    let mut enqueued: HashSet<&NodeId> = HashSet::from([start]);
    let mut queue: VecDeque<Vec<&NodeId>> = VecDeque::from([vec![start]]);

    while let Some(path) = queue.pop_front() {
        let Some(last) = path.last() else {
            continue;
        };
        let Some(neighbors) = adjacency.get(*last) else {
            continue;
        };
        for next in neighbors {
            if !enqueued.insert(next) {
                continue;
            }
            let mut candidate = path.clone();
            candidate.push(next);
            if next == end {
                return candidate.into_iter().cloned().collect();
            }
            queue.push_back(candidate);
        }
    }

    Vec::new()
}

/// [`compute_path`] over a freshly built adjacency map of `graph`.
pub fn shortest_path(graph: &Graph, start: &NodeId, end: &NodeId) -> Vec<NodeId> {
    let path = compute_path(start, end, &graph.graph_map());
    tracing::debug!(%start, %end, len = path.len(), "path search");
    path
}
