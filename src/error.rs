//! Error types for graph construction and metric computation.
//!
//! Two kinds of failure exist. [`InvalidInput`] rejects a whole operation
//! (non-finite samples, mismatched lengths). [`MetricUnavailable`] is scoped
//! to a single derived statistic and is stored next to the metrics that
//! could be computed, see [`crate::analysis::GraphMetrics`].

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Convenience alias used by the public entry points.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by [`crate::build_visibility_graph`],
/// [`crate::compute_metrics`] and [`crate::analyze`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("metric unavailable: {0}")]
    MetricUnavailable(#[from] MetricUnavailable),
}

/// The caller handed over data the engine refuses to process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    /// A NaN or infinite sample.
    #[error("sample {index} is not finite ({value})")]
    NonFiniteValue { index: usize, value: f64 },
    /// `values` and the graph describe series of different lengths.
    #[error("got {values} values for a graph with {nodes} nodes")]
    LengthMismatch { values: usize, nodes: usize },
    /// An explicit edge is a self loop or points outside the node range.
    #[error("edge ({from}, {to}) is not valid for a graph with {nodes} nodes")]
    InvalidEdge { from: usize, to: usize, nodes: usize },
}

/// A single statistic cannot be derived from the data at hand.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricUnavailable {
    #[error("degree sequence is empty, no distribution to show")]
    EmptyDegreeSequence,
    #[error("at least two nodes are required, got {nodes}")]
    TooFewNodes { nodes: usize },
    #[error("all sample values are identical, regression is undefined")]
    ZeroPredictorVariance,
    #[error("least squares fit failed: {0}")]
    DegenerateFit(String),
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("graph is split into {components} components")]
    Disconnected { components: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_wraps_invalid_input() {
        let err: Error = InvalidInput::NonFiniteValue {
            index: 3,
            value: f64::NAN,
        }
        .into();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInput::NonFiniteValue { index: 3, .. })
        ));
        assert!(err.to_string().contains("sample 3"));
    }

    #[test]
    fn test_error_wraps_metric_unavailable() {
        let err: Error = MetricUnavailable::Disconnected { components: 2 }.into();
        assert_eq!(
            err.to_string(),
            "metric unavailable: graph is split into 2 components"
        );
    }
}
