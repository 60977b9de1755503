use std::collections::VecDeque;

use scenegraph_core::{EdgeId, Entity, EntityIds, Graph, NodeId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow incoming edges (towards causes).
    Upstream,
    /// Follow outgoing edges (towards effects).
    Downstream,
    Both,
}

/// Every node reachable from `seeds` along outgoing edges, seeds included.
pub fn downstream_nodes<'a>(
    seeds: impl IntoIterator<Item = &'a NodeId>,
    graph: &Graph,
) -> EntityIds<NodeId> {
    closure(seeds, graph, Follow::Outgoing)
}

/// Every node that reaches `seeds` along outgoing edges, seeds included.
pub fn upstream_nodes<'a>(
    seeds: impl IntoIterator<Item = &'a NodeId>,
    graph: &Graph,
) -> EntityIds<NodeId> {
    closure(seeds, graph, Follow::Incoming)
}

#[derive(Debug, Clone, Copy)]
enum Follow {
    Outgoing,
    Incoming,
}

fn closure<'a>(
    seeds: impl IntoIterator<Item = &'a NodeId>,
    graph: &Graph,
    follow: Follow,
) -> EntityIds<NodeId> {
    let mut visited: EntityIds<NodeId> = seeds.into_iter().cloned().collect();
    let mut queue: VecDeque<NodeId> = visited.iter().cloned().collect();

    while let Some(current) = queue.pop_front() {
        let edges = match follow {
            Follow::Outgoing => graph.edges_from(&current),
            Follow::Incoming => graph.edges_to(&current),
        };
        for edge in edges {
            let Some(next) = edge.other_end(&current) else {
                continue;
            };
            if visited.add(next.clone()) {
                queue.push_back(next.clone());
            }
        }
    }

    visited
}

/// Upstream and downstream closure of a selection plus the edges among it.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct EntirePath {
    pub nodes: EntityIds<NodeId>,
    pub edges: EntityIds<EdgeId>,
}

pub fn entire_path<'a>(
    seeds: impl IntoIterator<Item = &'a NodeId>,
    graph: &Graph,
) -> EntirePath {
    reachable(seeds, graph, Direction::Both)
}

/// Nodes reachable from `seeds` in `direction` and the induced edges.
///
/// `Direction::Both` is the union of the upstream and downstream closures,
/// not an undirected walk.
pub fn reachable<'a>(
    seeds: impl IntoIterator<Item = &'a NodeId>,
    graph: &Graph,
    direction: Direction,
) -> EntirePath {
    let seeds: Vec<&NodeId> = seeds.into_iter().collect();
    let nodes = match direction {
        Direction::Upstream => upstream_nodes(seeds.iter().copied(), graph),
        Direction::Downstream => downstream_nodes(seeds.iter().copied(), graph),
        Direction::Both => upstream_nodes(seeds.iter().copied(), graph)
            .union(&downstream_nodes(seeds.iter().copied(), graph)),
    };
    let edges = graph
        .edges_connecting(&nodes)
        .into_iter()
        .map(|e| e.id().clone())
        .collect();
    let result = EntirePath { nodes, edges };
    tracing::debug!(
        ?direction,
        seeds = seeds.len(),
        nodes = result.nodes.len(),
        edges = result.edges.len(),
        "reachability"
    );
    result
}
