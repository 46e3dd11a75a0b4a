//! Degree sequence and degree distribution of a visibility graph.
//!
//! The degree distribution is the quantity usually plotted for visibility
//! graphs of RR series; its histogram covers every degree between the
//! smallest and the largest observed one, so bins stay contiguous even where
//! no node has that degree.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MetricUnavailable;
use crate::graph::VisibilityGraph;

/// Degree of every node, indexed like the series.
pub fn degree_sequence(graph: &VisibilityGraph) -> Vec<usize> {
    (0..graph.node_count()).map(|node| graph.degree(node)).collect()
}

/// Node counts per degree over the contiguous range
/// `min_degree..=max_degree`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeHistogram {
    min_degree: usize,
    counts: Vec<usize>,
}

impl DegreeHistogram {
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    pub fn max_degree(&self) -> usize {
        self.min_degree + self.counts.len() - 1
    }

    /// Count per degree, starting at [`DegreeHistogram::min_degree`].
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of nodes having `degree`; zero outside the covered range.
    pub fn count(&self, degree: usize) -> usize {
        degree
            .checked_sub(self.min_degree)
            .and_then(|offset| self.counts.get(offset))
            .copied()
            .unwrap_or(0)
    }

    /// `(degree, count)` pairs in increasing degree order.
    pub fn bins(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(offset, &count)| (self.min_degree + offset, count))
    }

    /// Total number of nodes counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bins a degree sequence.
///
/// # Errors
///
/// Returns [`MetricUnavailable::EmptyDegreeSequence`] if `degrees` is empty:
/// there is no distribution to show.
pub fn degree_histogram(degrees: &[usize]) -> Result<DegreeHistogram, MetricUnavailable> {
    let (Some(&min_degree), Some(&max_degree)) = (degrees.iter().min(), degrees.iter().max())
    else {
        return Err(MetricUnavailable::EmptyDegreeSequence);
    };
    let mut counts = vec![0; max_degree - min_degree + 1];
    for &degree in degrees {
        counts[degree - min_degree] += 1;
    }
    Ok(DegreeHistogram { min_degree, counts })
}
