//! The natural visibility criterion and the algorithms that evaluate it.
//!
//! Two samples `(i, value[i])` and `(j, value[j])` with `i < j` see each other
//! when every intermediate sample `k` lies below the straight line joining
//! them. Whether a sample lying exactly on that line blocks the view is
//! decided by [`VisibilityPolicy`].
//!
//! Both built-in algorithms decide "below the line" the same way: the slope
//! from `i` to `j` must exceed the slope from `i` to `k`, with both slopes
//! computed by [`slope`].
//!
//! The module includes:
//!
//! - `VisibilityAlgorithm` trait: computes the set of later samples visible from one origin.
//! - `ConstructionStrategy` enum: selects the max-slope sweep, the naive scan, or a user algorithm.
//! - `MaxSlopeVisibility`: `O(n)` per origin, the reference implementation.
//! - `NaiveVisibility`: `O(n²)` per origin, used to cross-check the sweep.
//!
//! # Example
//!
//! ```rust
//! use hrv_vga::graph::visibility::{
//!     MaxSlopeVisibility, NaiveVisibility, VisibilityAlgorithm, VisibilityPolicy,
//! };
//!
//! let rr = [1.0, 2.0, 3.0, 1.0, 4.0];
//! let fast = MaxSlopeVisibility.visible_from(&rr, 2, VisibilityPolicy::Strict);
//! let slow = NaiveVisibility.visible_from(&rr, 2, VisibilityPolicy::Strict);
//! assert_eq!(fast, vec![3, 4]);
//! assert_eq!(fast, slow);
//! ```
//!
//! # References
//!
//! - Lacasa, L., Luque, B., Ballesteros, F., Luque, J., Nuño, J. C. (2008). *From time series to complex networks: The visibility graph*. PNAS, 105(13), 4972-4975.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a sample lying exactly on the line of sight is treated.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityPolicy {
    /// Collinear samples obstruct: every intermediate sample must lie strictly
    /// below the line.
    #[default]
    Strict,
    /// Collinear samples do not obstruct.
    Inclusive,
}

impl VisibilityPolicy {
    /// Policy used by [`crate::build_visibility_graph`].
    pub const DEFAULT: Self = Self::Strict;

    /// Returns `true` if a target seen at `slope` rises above an obstacle
    /// seen at `max_slope` from the same origin.
    pub fn exceeds(self, slope: f64, max_slope: f64) -> bool {
        match self {
            VisibilityPolicy::Strict => slope > max_slope,
            VisibilityPolicy::Inclusive => slope >= max_slope,
        }
    }
}

/// A visibility algorithm evaluating the criterion from a single origin.
///
/// # Example
///
/// ```
/// use hrv_vga::graph::visibility::{VisibilityAlgorithm, VisibilityPolicy};
///
/// /// Only neighbouring samples see each other.
/// struct Adjacent;
///
/// impl VisibilityAlgorithm for Adjacent {
///     fn visible_from(&self, values: &[f64], origin: usize, _: VisibilityPolicy) -> Vec<usize> {
///         (origin + 1..values.len()).take(1).collect()
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait VisibilityAlgorithm {
    /// Returns the indices `j > origin` visible from `origin`, in increasing
    /// order.
    ///
    /// # Parameters
    ///
    /// - `values`: the whole series.
    /// - `origin`: index of the observing sample.
    /// - `policy`: how collinear samples are treated.
    fn visible_from(&self, values: &[f64], origin: usize, policy: VisibilityPolicy) -> Vec<usize>;
}

/// Available strategies for building the visibility graph.
/// user provided algorithms can be passed via the `Custom` variant.
#[derive(Default)]
pub enum ConstructionStrategy {
    /// Running maximum of slopes, `O(n²)` for the whole graph.
    #[default]
    MaxSlope,
    /// Pairwise scan of the intermediate samples, `O(n³)` worst case.
    Naive,
    /// A user algorithm. It must be `Send` and `Sync` so the outer loop can
    /// be sharded across threads.
    Custom(Box<dyn VisibilityAlgorithm + Send + Sync>),
}

impl fmt::Debug for ConstructionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionStrategy::MaxSlope => f.write_str("MaxSlope"),
            ConstructionStrategy::Naive => f.write_str("Naive"),
            ConstructionStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// implement the trait for the enum to dispatch calculation
impl VisibilityAlgorithm for ConstructionStrategy {
    fn visible_from(&self, values: &[f64], origin: usize, policy: VisibilityPolicy) -> Vec<usize> {
        match self {
            ConstructionStrategy::MaxSlope => {
                MaxSlopeVisibility.visible_from(values, origin, policy)
            }
            ConstructionStrategy::Naive => NaiveVisibility.visible_from(values, origin, policy),
            ConstructionStrategy::Custom(algorithm) => {
                algorithm.visible_from(values, origin, policy)
            }
        }
    }
}

/// Slope of the line of sight from `origin` to `target`.
///
/// Every built-in algorithm goes through this function so that collinearity
/// is decided on identical floating-point values.
pub fn slope(values: &[f64], origin: usize, target: usize) -> f64 {
    (values[target] - values[origin]) / (target - origin) as f64
}

/// Sweeps the targets in increasing order while tracking the steepest line
/// of sight seen so far.
///
/// A target is hidden exactly when an earlier sample already subtends a
/// slope at least as steep as its own, so one comparison per target suffices.
pub struct MaxSlopeVisibility;

impl VisibilityAlgorithm for MaxSlopeVisibility {
    fn visible_from(&self, values: &[f64], origin: usize, policy: VisibilityPolicy) -> Vec<usize> {
        let mut max_slope = f64::NEG_INFINITY;
        let mut visible = Vec::new();
        for target in origin + 1..values.len() {
            let slope = slope(values, origin, target);
            // nothing lies between neighbours
            if target == origin + 1 || policy.exceeds(slope, max_slope) {
                visible.push(target);
            }
            max_slope = max_slope.max(slope);
        }
        visible
    }
}

/// Checks every intermediate sample against the line of sight, stopping
/// at the first obstruction.
pub struct NaiveVisibility;

impl VisibilityAlgorithm for NaiveVisibility {
    fn visible_from(&self, values: &[f64], origin: usize, policy: VisibilityPolicy) -> Vec<usize> {
        (origin + 1..values.len())
            .filter(|&target| {
                let sight = slope(values, origin, target);
                (origin + 1..target).all(|k| policy.exceeds(sight, slope(values, origin, k)))
            })
            .collect()
    }
}
