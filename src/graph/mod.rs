//! Visibility graph representation and construction.
//!
//! - `visibility`: the visibility criterion and the algorithms evaluating it.
//! - `builder`: turns a [`crate::series::SeriesBuffer`] into a [`VisibilityGraph`].
pub mod builder;
pub mod visibility;

use std::collections::BTreeSet;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::error::InvalidInput;

/// An undirected simple graph whose nodes are the sample indices of a series.
///
/// Node `i` of the underlying petgraph graph is sample `i`; the graph never
/// stores sample values.
#[derive(Debug, Clone)]
pub struct VisibilityGraph {
    graph: UnGraph<(), ()>,
}

impl VisibilityGraph {
    /// Assembles a graph from per-origin lists of visible later indices.
    ///
    /// `visible[i]` must only hold indices `j` with `i < j < node_count`.
    pub(crate) fn from_visible_lists(node_count: usize, visible: Vec<Vec<usize>>) -> Self {
        let edge_count = visible.iter().map(Vec::len).sum();
        let mut graph = UnGraph::with_capacity(node_count, edge_count);
        for _ in 0..node_count {
            graph.add_node(());
        }
        for (origin, targets) in visible.into_iter().enumerate() {
            for target in targets {
                graph.add_edge(NodeIndex::new(origin), NodeIndex::new(target), ());
            }
        }
        Self { graph }
    }

    /// Builds a graph from an explicit edge list.
    ///
    /// Pairs are unordered and duplicates collapse into one edge.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::InvalidEdge`] for a self loop or an endpoint
    /// outside `0..node_count`.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, InvalidInput>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut normalized = BTreeSet::new();
        for (from, to) in edges {
            if from == to || from >= node_count || to >= node_count {
                return Err(InvalidInput::InvalidEdge {
                    from,
                    to,
                    nodes: node_count,
                });
            }
            normalized.insert((from.min(to), from.max(to)));
        }
        let mut visible = vec![Vec::new(); node_count];
        for (from, to) in normalized {
            visible[from].push(to);
        }
        Ok(Self::from_visible_lists(node_count, visible))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All edges as `(i, j)` pairs with `i < j`, sorted.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|edge| {
                let (a, b) = (edge.source().index(), edge.target().index());
                (a.min(b), a.max(b))
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Whether samples `a` and `b` see each other. Order does not matter.
    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        a < self.node_count()
            && b < self.node_count()
            && self
                .graph
                .find_edge(NodeIndex::new(a), NodeIndex::new(b))
                .is_some()
    }

    /// Nodes adjacent to `node`; empty for an unknown node.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors(NodeIndex::new(node))
            .map(|neighbor| neighbor.index())
    }

    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).count()
    }

    /// The underlying petgraph graph, for hosts that want to run their own
    /// algorithms on it.
    pub fn as_petgraph(&self) -> &UnGraph<(), ()> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_normalizes_and_dedups() {
        let graph = VisibilityGraph::from_edges(4, [(1, 0), (0, 1), (3, 2), (1, 2)]).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edges(), vec![(0, 1), (1, 2), (2, 3)]);
        assert!(graph.contains_edge(2, 1));
        assert!(!graph.contains_edge(0, 3));
        assert!(!graph.contains_edge(0, 7));
    }

    #[test]
    fn test_from_edges_rejects_self_loop() {
        let result = VisibilityGraph::from_edges(3, [(0, 1), (2, 2)]);
        assert!(matches!(
            result,
            Err(InvalidInput::InvalidEdge { from: 2, to: 2, nodes: 3 })
        ));
    }

    #[test]
    fn test_from_edges_rejects_out_of_range() {
        let result = VisibilityGraph::from_edges(2, [(0, 2)]);
        assert!(result.is_err(), "edge to a missing node should be rejected");
    }

    #[test]
    fn test_degree_and_neighbors() {
        let graph = VisibilityGraph::from_edges(4, [(0, 1), (0, 2), (0, 3)]).unwrap();
        assert_eq!(graph.degree(0), 3);
        assert_eq!(graph.degree(3), 1);
        let mut neighbors: Vec<_> = graph.neighbors(0).collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![1, 2, 3]);
        assert_eq!(graph.degree(10), 0);
    }

    #[test]
    fn test_empty_graph() {
        let graph = VisibilityGraph::from_edges(0, std::iter::empty()).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.as_petgraph().node_count(), 0);
    }
}
