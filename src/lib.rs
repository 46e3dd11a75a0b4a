//! HRV (Heart Rate Variability) Visibility Graph Analysis
//!
//! This crate turns a series of RR intervals into its natural visibility
//! graph and derives descriptors of that graph: degree sequence, degree
//! distribution, degree-vs-interval regression, connectivity and average
//! shortest path length.
//!
//! # Example
//!
//! ```rust
//! use hrv_vga::{build_visibility_graph, compute_metrics};
//!
//! let rr = [812.0, 790.0, 845.0, 801.0, 799.0, 830.0];
//! let graph = build_visibility_graph(&rr).unwrap();
//! let metrics = compute_metrics(&graph, &rr).unwrap();
//! assert!(metrics.is_connected);
//! println!("mean degree: {:?}", metrics.mean_degree());
//! if let Ok(histogram) = &metrics.histogram {
//!     for (degree, count) in histogram.bins() {
//!         println!("{degree}: {count}");
//!     }
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod graph;
pub mod series;

pub use analysis::GraphMetrics;
pub use error::{Error, InvalidInput, MetricUnavailable, Result};
pub use graph::builder::VisibilityGraphBuilder;
pub use graph::visibility::{ConstructionStrategy, VisibilityPolicy};
pub use graph::VisibilityGraph;
pub use series::SeriesBuffer;

/// Builds the natural visibility graph of `values` with the default
/// [`VisibilityGraphBuilder`].
///
/// # Errors
///
/// Returns [`InvalidInput::NonFiniteValue`] if a value is NaN or infinite.
pub fn build_visibility_graph(values: &[f64]) -> Result<VisibilityGraph> {
    let series = SeriesBuffer::from_slice(values)?;
    Ok(VisibilityGraphBuilder::new().build(&series))
}

/// Computes every descriptor of `graph`, see [`GraphMetrics::compute`].
///
/// # Errors
///
/// Returns [`InvalidInput`] if `values` does not match the graph or is not
/// finite. Statistics that cannot be derived are reported inside the
/// returned [`GraphMetrics`].
pub fn compute_metrics(graph: &VisibilityGraph, values: &[f64]) -> Result<GraphMetrics> {
    GraphMetrics::compute(graph, values)
}

/// Builds the visibility graph of `values` and computes its descriptors.
pub fn analyze(values: &[f64]) -> Result<(VisibilityGraph, GraphMetrics)> {
    let graph = build_visibility_graph(values)?;
    let metrics = compute_metrics(&graph, values)?;
    Ok((graph, metrics))
}
