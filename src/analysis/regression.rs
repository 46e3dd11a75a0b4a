//! Linear regression of node degree against sample value.
//!
//! In a visibility graph of an RR series, large intervals tend to act as
//! hubs: they see over their neighbours. The slope and correlation of degree
//! against interval length summarise that relation; the p-value tests the
//! null hypothesis of zero slope with a two-sided Student-t test on `n - 2`
//! degrees of freedom.
//!
//! # Example
//!
//! ```rust
//! use hrv_vga::analysis::regression::degree_regression;
//!
//! let values = [800.0, 850.0, 900.0, 950.0];
//! let degrees = [1, 2, 3, 4];
//! let fit = degree_regression(&degrees, &values).unwrap();
//! assert!((fit.slope - 0.02).abs() < 1e-9);
//! assert!((fit.r_value - 1.0).abs() < 1e-9);
//! ```

use nalgebra::{DMatrix, DVector, DVectorView};
use statrs::distribution::{ContinuousCDF, StudentsT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{InvalidInput, MetricUnavailable};

/// Guards the t statistic against division by zero for a perfect fit.
const TINY: f64 = 1.0e-20;

/// Result of the least squares fit `degree = slope * value + intercept`.
///
/// # Fields
///
/// * `slope` - Change in degree per unit of sample value.
/// * `intercept` - Degree predicted for a sample value of zero.
/// * `r_value` - Pearson correlation coefficient, in `[-1, 1]`.
/// * `p_value` - Two-sided p-value for the null hypothesis `slope == 0`.
/// * `std_err` - Standard error of the slope estimate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeRegression {
    pub slope: f64,
    pub intercept: f64,
    pub r_value: f64,
    pub p_value: f64,
    pub std_err: f64,
}

impl DegreeRegression {
    /// Coefficient of determination of the fit.
    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }
}

/// Regresses `degrees` (response) on `values` (predictor).
///
/// # Errors
///
/// - [`InvalidInput::LengthMismatch`] if the slices differ in length.
/// - [`MetricUnavailable::TooFewNodes`] for fewer than two points.
/// - [`MetricUnavailable::ZeroPredictorVariance`] if all values are identical.
/// - [`MetricUnavailable::DegenerateFit`] if the spread of the values overflows
///   or underflows `f64`.
pub fn degree_regression(degrees: &[usize], values: &[f64]) -> crate::Result<DegreeRegression> {
    if degrees.len() != values.len() {
        return Err(InvalidInput::LengthMismatch {
            values: values.len(),
            nodes: degrees.len(),
        }
        .into());
    }
    let degrees: Vec<f64> = degrees.iter().map(|&degree| degree as f64).collect();
    Ok(linear_fit(values, &degrees)?)
}

/// Ordinary least squares fit of `y` on `x` with correlation and
/// significance statistics.
///
/// `x` and `y` must have the same length.
pub(crate) fn linear_fit(x: &[f64], y: &[f64]) -> Result<DegreeRegression, MetricUnavailable> {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    if n < 2 {
        return Err(MetricUnavailable::TooFewNodes { nodes: n });
    }
    if x.iter().all(|&xi| xi == x[0]) {
        return Err(MetricUnavailable::ZeroPredictorVariance);
    }
    let x = DVectorView::from(x);
    let x_mean = x.mean();
    let ss_x: f64 = x.iter().map(|&xi| (xi - x_mean).powi(2)).sum();
    // distinct values whose spread does not survive squaring
    if !ss_x.is_finite() || ss_x == 0.0 {
        return Err(MetricUnavailable::DegenerateFit(format!(
            "sum of squared deviations of the values is {ss_x}"
        )));
    }

    let prob_matrix = DMatrix::from_columns(&[
        x.clone_owned(),
        DVector::from_element(n, 1.0),
    ]);
    let y = DVectorView::from(y);
    let result = lstsq::lstsq(&prob_matrix, &y.into(), f64::EPSILON)
        .map_err(|e| MetricUnavailable::DegenerateFit(e.to_string()))?;
    let (slope, intercept) = (result.solution[0], result.solution[1]);

    let y_mean = y.mean();
    let ss_y: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
    let ss_xy: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - x_mean) * (yi - y_mean))
        .sum();

    // a constant response is uncorrelated with anything
    let r_value = if ss_y == 0.0 {
        0.0
    } else {
        (ss_xy / (ss_x * ss_y).sqrt()).clamp(-1.0, 1.0)
    };

    let (p_value, std_err) = if n == 2 {
        // two points always lie on a line
        let p_value = if y[0] == y[1] { 1.0 } else { 0.0 };
        (p_value, 0.0)
    } else {
        let df = (n - 2) as f64;
        let t = r_value * (df / ((1.0 - r_value + TINY) * (1.0 + r_value + TINY))).sqrt();
        let students_t = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| MetricUnavailable::DegenerateFit(e.to_string()))?;
        let p_value = (2.0 * students_t.sf(t.abs())).min(1.0);
        let std_err = ((1.0 - r_value * r_value) * ss_y / ss_x / df).max(0.0).sqrt();
        (p_value, std_err)
    };

    Ok(DegreeRegression {
        slope,
        intercept,
        r_value,
        p_value,
        std_err,
    })
}
