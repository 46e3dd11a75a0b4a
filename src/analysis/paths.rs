//! Connectivity and average shortest path length.
//!
//! The average shortest path length is only meaningful on a connected graph:
//! averaging over the reachable pairs of a split graph would silently mix
//! components, so a disconnected graph reports
//! [`MetricUnavailable::Disconnected`] instead.

use petgraph::algo::{connected_components, dijkstra};
use petgraph::graph::NodeIndex;
use petgraph::visit::Bfs;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::MetricUnavailable;
use crate::graph::VisibilityGraph;

/// Returns `true` if a traversal from node 0 reaches every node.
///
/// A graph without nodes is not connected; a single node is.
pub fn is_connected(graph: &VisibilityGraph) -> bool {
    let n = graph.node_count();
    if n == 0 {
        return false;
    }
    let inner = graph.as_petgraph();
    let mut bfs = Bfs::new(inner, NodeIndex::new(0));
    let mut reached = 0;
    while bfs.next(inner).is_some() {
        reached += 1;
    }
    reached == n
}

/// Number of connected components.
pub fn component_count(graph: &VisibilityGraph) -> usize {
    connected_components(graph.as_petgraph())
}

/// Mean number of edges on a shortest path, over all unordered pairs of
/// distinct nodes.
///
/// One unit-cost shortest-path search runs per source node, on the calling
/// thread.
///
/// # Errors
///
/// - [`MetricUnavailable::EmptyGraph`] if the graph has no nodes.
/// - [`MetricUnavailable::Disconnected`] if some pair of nodes has no path.
///
/// A single node has no pairs; its average path length is reported as `0.0`.
pub fn average_shortest_path_length(graph: &VisibilityGraph) -> Result<f64, MetricUnavailable> {
    average_path_length_with(graph, false)
}

/// Same as [`average_shortest_path_length`], with the per-source searches
/// spread over the rayon pool.
pub fn par_average_shortest_path_length(
    graph: &VisibilityGraph,
) -> Result<f64, MetricUnavailable> {
    average_path_length_with(graph, true)
}

pub(crate) fn average_path_length_with(
    graph: &VisibilityGraph,
    parallel: bool,
) -> Result<f64, MetricUnavailable> {
    let n = graph.node_count();
    if n == 0 {
        return Err(MetricUnavailable::EmptyGraph);
    }
    if !is_connected(graph) {
        return Err(MetricUnavailable::Disconnected {
            components: component_count(graph),
        });
    }
    if n == 1 {
        return Ok(0.0);
    }
    // every unordered pair is counted once from each end
    let total: usize = if parallel {
        (0..n)
            .into_par_iter()
            .map(|source| distance_sum(graph, source))
            .sum()
    } else {
        (0..n).map(|source| distance_sum(graph, source)).sum()
    };
    Ok(total as f64 / (n * (n - 1)) as f64)
}

/// Sum of hop distances from `source` to every node it reaches.
///
/// With unit edge costs dijkstra settles nodes in breadth-first order.
fn distance_sum(graph: &VisibilityGraph, source: usize) -> usize {
    dijkstra(graph.as_petgraph(), NodeIndex::new(source), None, |_| 1usize)
        .values()
        .sum()
}
