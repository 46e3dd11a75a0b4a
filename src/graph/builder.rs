//! Construction of a [`VisibilityGraph`] from a [`SeriesBuffer`].
//!
//! Each origin `i` only reads the series and yields the later samples it can
//! see, so the outer loop can be sharded with rayon. Per-origin lists are
//! collected in index order, which keeps the resulting graph identical to the
//! sequential build.
//!
//! # Example
//!
//! ```rust
//! use hrv_vga::graph::builder::VisibilityGraphBuilder;
//! use hrv_vga::graph::visibility::{ConstructionStrategy, VisibilityPolicy};
//! use hrv_vga::series::SeriesBuffer;
//!
//! let series = SeriesBuffer::from_slice(&[812.0, 790.0, 845.0, 801.0, 799.0]).unwrap();
//! let graph = VisibilityGraphBuilder::new()
//!     .policy(VisibilityPolicy::Inclusive)
//!     .strategy(ConstructionStrategy::MaxSlope)
//!     .parallel(true)
//!     .build(&series);
//! assert_eq!(graph.node_count(), 5);
//! assert!(graph.contains_edge(0, 2));
//! ```

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, debug_span, warn};

use super::visibility::{ConstructionStrategy, VisibilityAlgorithm, VisibilityPolicy};
use super::VisibilityGraph;
use crate::series::SeriesBuffer;

/// Configures and runs the visibility graph construction.
///
/// Defaults: [`VisibilityPolicy::Strict`], [`ConstructionStrategy::MaxSlope`],
/// sequential execution.
#[derive(Debug, Default)]
pub struct VisibilityGraphBuilder {
    policy: VisibilityPolicy,
    strategy: ConstructionStrategy,
    parallel: bool,
}

impl VisibilityGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how samples lying exactly on a line of sight are treated.
    pub fn policy(mut self, policy: VisibilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the algorithm evaluating visibility from each origin.
    pub fn strategy(mut self, strategy: ConstructionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Shards the origins across the rayon thread pool when `true`.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn get_policy(&self) -> VisibilityPolicy {
        self.policy
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Builds the visibility graph of `series`.
    ///
    /// Never fails: an empty or single-sample series yields a graph with that
    /// many nodes and no edges.
    pub fn build(&self, series: &SeriesBuffer) -> VisibilityGraph {
        let values = series.values();
        let n = values.len();
        let _span = debug_span!(
            "visibility_graph",
            nodes = n,
            strategy = ?self.strategy,
            policy = ?self.policy,
            parallel = self.parallel
        )
        .entered();

        let visible: Vec<Vec<usize>> = if self.parallel {
            (0..n)
                .into_par_iter()
                .map(|origin| self.visible_from(values, origin))
                .collect()
        } else {
            (0..n)
                .map(|origin| self.visible_from(values, origin))
                .collect()
        };

        let graph = VisibilityGraph::from_visible_lists(n, visible);
        debug!(edges = graph.edge_count(), "visibility graph built");
        graph
    }

    fn visible_from(&self, values: &[f64], origin: usize) -> Vec<usize> {
        let mut visible = self.strategy.visible_from(values, origin, self.policy);
        let returned = visible.len();
        visible.retain(|&target| target > origin && target < values.len());
        if visible.len() != returned {
            warn!(
                origin,
                dropped = returned - visible.len(),
                "strategy returned targets outside the visible range"
            );
        }
        // custom strategies are not required to be ordered or unique
        visible.sort_unstable();
        visible.dedup();
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::visibility::MockVisibilityAlgorithm;

    fn series(values: &[f64]) -> SeriesBuffer {
        SeriesBuffer::from_slice(values).unwrap()
    }

    #[test]
    fn test_empty_and_single_series() {
        let builder = VisibilityGraphBuilder::new();
        let empty = builder.build(&series(&[]));
        assert_eq!(empty.node_count(), 0);
        assert_eq!(empty.edge_count(), 0);
        let single = builder.build(&series(&[1000.0]));
        assert_eq!(single.node_count(), 1);
        assert_eq!(single.edge_count(), 0);
    }

    #[test]
    fn test_reference_vector() {
        let graph = VisibilityGraphBuilder::new().build(&series(&[1.0, 2.0, 3.0, 1.0, 4.0]));
        assert_eq!(graph.edges(), vec![(0, 1), (1, 2), (2, 3), (2, 4), (3, 4)]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let values: Vec<f64> = (0..64)
            .map(|i| 800.0 + ((i * 37) % 23) as f64 * 5.0)
            .collect();
        let values = series(&values);
        let sequential = VisibilityGraphBuilder::new().build(&values);
        let parallel = VisibilityGraphBuilder::new().parallel(true).build(&values);
        assert_eq!(sequential.edges(), parallel.edges());
    }

    #[test]
    fn test_convex_series_is_complete() {
        let graph = VisibilityGraphBuilder::new().build(&series(&[0.0, -3.0, -4.0, -4.5, -4.7]));
        assert_eq!(graph.edge_count(), 10);
    }

    #[test]
    fn test_builder_settings() {
        let builder = VisibilityGraphBuilder::new()
            .policy(VisibilityPolicy::Inclusive)
            .parallel(true);
        assert_eq!(builder.get_policy(), VisibilityPolicy::Inclusive);
        assert!(builder.is_parallel());
        let default = VisibilityGraphBuilder::default();
        assert_eq!(default.get_policy(), VisibilityPolicy::Strict);
        assert!(!default.is_parallel());
    }

    #[test]
    fn test_custom_strategy_out_of_range_targets_dropped() {
        let mut algorithm = MockVisibilityAlgorithm::new();
        algorithm
            .expect_visible_from()
            .times(3)
            .returning(|values, origin, _| {
                // backwards, self, duplicate and past-the-end targets
                vec![origin.saturating_sub(1), origin, origin + 1, origin + 1, values.len()]
            });
        let graph = VisibilityGraphBuilder::new()
            .strategy(ConstructionStrategy::Custom(Box::new(algorithm)))
            .build(&series(&[1.0, 2.0, 3.0]));
        assert_eq!(graph.edges(), vec![(0, 1), (1, 2)]);
    }
}
