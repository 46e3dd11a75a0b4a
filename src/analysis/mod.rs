/// This module contains the descriptors derived from a visibility graph.
///
/// The available submodules are:
///
/// - `degree`: degree sequence and contiguous degree histogram.
/// - `paths`: connectivity and average shortest path length.
/// - `regression`: linear regression of degree against sample value.
///
/// [`GraphMetrics`] bundles all of them for one graph.
pub mod degree;
pub mod paths;
pub mod regression;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::error::{InvalidInput, MetricUnavailable};
use crate::graph::VisibilityGraph;
use crate::series::check_finite;
use degree::DegreeHistogram;
use regression::DegreeRegression;

/// Every descriptor of a visibility graph.
///
/// Statistics that cannot be derived from the data are stored as
/// `Err(MetricUnavailable)` next to those that could; one unavailable metric
/// never hides the others.
///
/// # Fields
///
/// * `degrees` - Degree of each node, indexed like the series.
/// * `histogram` - Node counts per degree over `[min, max]` degree.
/// * `regression` - Fit of degree (response) against sample value (predictor).
/// * `is_connected` - Whether every node reaches every other node.
/// * `average_path_length` - Mean shortest path length, only when connected.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GraphMetrics {
    pub degrees: Vec<usize>,
    pub histogram: Result<DegreeHistogram, MetricUnavailable>,
    pub regression: Result<DegreeRegression, MetricUnavailable>,
    pub is_connected: bool,
    pub average_path_length: Result<f64, MetricUnavailable>,
}

impl GraphMetrics {
    /// Computes all descriptors of `graph`, built from the series `values`.
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::LengthMismatch`] if `values` does not have one
    ///   entry per node.
    /// - [`InvalidInput::NonFiniteValue`] if a value is NaN or infinite.
    pub fn compute(graph: &VisibilityGraph, values: &[f64]) -> crate::Result<Self> {
        Self::compute_with(graph, values, false)
    }

    /// Same as [`GraphMetrics::compute`], with the path-length sweep spread
    /// over the rayon pool.
    pub fn compute_parallel(graph: &VisibilityGraph, values: &[f64]) -> crate::Result<Self> {
        Self::compute_with(graph, values, true)
    }

    fn compute_with(graph: &VisibilityGraph, values: &[f64], parallel: bool) -> crate::Result<Self> {
        if values.len() != graph.node_count() {
            return Err(InvalidInput::LengthMismatch {
                values: values.len(),
                nodes: graph.node_count(),
            }
            .into());
        }
        check_finite(values)?;
        let _span = debug_span!("graph_metrics", nodes = graph.node_count(), parallel).entered();

        let degrees = degree::degree_sequence(graph);
        let histogram = degree::degree_histogram(&degrees);
        let response: Vec<f64> = degrees.iter().map(|&degree| degree as f64).collect();
        let regression = regression::linear_fit(values, &response);
        let is_connected = paths::is_connected(graph);
        let average_path_length = paths::average_path_length_with(graph, parallel);

        for (metric, outcome) in [
            ("histogram", histogram.as_ref().err()),
            ("regression", regression.as_ref().err()),
            ("average_path_length", average_path_length.as_ref().err()),
        ] {
            if let Some(reason) = outcome {
                debug!(metric, %reason, "metric unavailable");
            }
        }

        Ok(GraphMetrics {
            degrees,
            histogram,
            regression,
            is_connected,
            average_path_length,
        })
    }

    pub fn node_count(&self) -> usize {
        self.degrees.len()
    }

    /// Number of edges, from the handshake lemma.
    pub fn edge_count(&self) -> usize {
        self.degrees.iter().sum::<usize>() / 2
    }

    /// Mean node degree, `None` for an empty graph.
    pub fn mean_degree(&self) -> Option<f64> {
        if self.degrees.is_empty() {
            None
        } else {
            Some(self.degrees.iter().sum::<usize>() as f64 / self.degrees.len() as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_metrics_reference_vector() {
        let values = [1.0, 2.0, 3.0, 1.0, 4.0];
        let graph =
            VisibilityGraph::from_edges(5, [(0, 1), (1, 2), (2, 3), (2, 4), (3, 4)]).unwrap();
        let metrics = GraphMetrics::compute(&graph, &values).unwrap();
        assert_eq!(metrics.degrees, vec![1, 2, 3, 2, 2]);
        assert_eq!(metrics.node_count(), 5);
        assert_eq!(metrics.edge_count(), 5);
        assert_eq!(metrics.mean_degree(), Some(2.0));
        let histogram = metrics.histogram.as_ref().unwrap();
        assert_eq!(histogram.bins().collect::<Vec<_>>(), vec![(1, 1), (2, 3), (3, 1)]);
        assert!(metrics.regression.is_ok());
        assert!(metrics.is_connected);
        // distance sums per source 9, 6, 5, 7, 7 over 20 ordered pairs
        assert_eq!(metrics.average_path_length, Ok(1.7));
    }

    #[test]
    fn test_metrics_parallel_matches_sequential() {
        let values = [812.0, 790.0, 845.0, 801.0, 799.0, 830.0, 760.0, 905.0];
        let graph = VisibilityGraph::from_edges(
            8,
            [
                (0, 1),
                (0, 2),
                (1, 2),
                (2, 3),
                (2, 5),
                (2, 7),
                (3, 4),
                (4, 5),
                (5, 6),
                (5, 7),
                (6, 7),
            ],
        )
        .unwrap();
        let sequential = GraphMetrics::compute(&graph, &values).unwrap();
        let parallel = GraphMetrics::compute_parallel(&graph, &values).unwrap();
        assert_eq!(sequential, parallel);
        assert!(sequential.average_path_length.is_ok());
    }

    #[test]
    fn test_metrics_length_mismatch() {
        let graph = VisibilityGraph::from_edges(2, [(0, 1)]).unwrap();
        let result = GraphMetrics::compute(&graph, &[1.0]);
        assert!(matches!(
            result,
            Err(Error::InvalidInput(InvalidInput::LengthMismatch {
                values: 1,
                nodes: 2
            }))
        ));
    }

    #[test]
    fn test_metrics_non_finite_value() {
        let graph = VisibilityGraph::from_edges(2, [(0, 1)]).unwrap();
        let result = GraphMetrics::compute(&graph, &[1.0, f64::INFINITY]);
        assert!(matches!(
            result,
            Err(Error::InvalidInput(InvalidInput::NonFiniteValue { index: 1, .. }))
        ));
    }

    #[test]
    fn test_unavailable_metrics_do_not_abort_others() {
        let graph = VisibilityGraph::from_edges(4, [(0, 1), (2, 3)]).unwrap();
        let metrics = GraphMetrics::compute(&graph, &[800.0; 4]).unwrap();
        assert_eq!(metrics.degrees, vec![1, 1, 1, 1]);
        assert_eq!(metrics.histogram.as_ref().map(|h| h.total()), Ok(4));
        assert_eq!(
            metrics.regression,
            Err(MetricUnavailable::ZeroPredictorVariance)
        );
        assert!(!metrics.is_connected);
        assert_eq!(
            metrics.average_path_length,
            Err(MetricUnavailable::Disconnected { components: 2 })
        );
    }

    #[test]
    fn test_metrics_empty_graph() {
        let graph = VisibilityGraph::from_edges(0, std::iter::empty()).unwrap();
        let metrics = GraphMetrics::compute(&graph, &[]).unwrap();
        assert!(metrics.degrees.is_empty());
        assert_eq!(metrics.histogram, Err(MetricUnavailable::EmptyDegreeSequence));
        assert_eq!(
            metrics.regression,
            Err(MetricUnavailable::TooFewNodes { nodes: 0 })
        );
        assert!(!metrics.is_connected);
        assert_eq!(metrics.average_path_length, Err(MetricUnavailable::EmptyGraph));
        assert_eq!(metrics.mean_degree(), None);
    }
}
