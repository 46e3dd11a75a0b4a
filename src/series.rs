//! Validated, read-only view over an RR interval series.
//!
//! The sample index doubles as the time coordinate of each point. Values are
//! checked for finiteness exactly once, here; the graph builder and the
//! metrics trust a [`SeriesBuffer`] without re-validating it.

use crate::error::InvalidInput;

/// An immutable sequence of finite samples.
///
/// # Example
///
/// ```
/// use hrv_vga::series::SeriesBuffer;
///
/// let series = SeriesBuffer::from_slice(&[812.0, 790.0, 845.0]).unwrap();
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.get(2), Some(845.0));
/// assert!(SeriesBuffer::from_slice(&[800.0, f64::NAN]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesBuffer {
    values: Vec<f64>,
}

impl SeriesBuffer {
    /// Takes ownership of `values` after checking that every sample is finite.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NonFiniteValue`] for the first NaN or infinite
    /// sample.
    pub fn new(values: Vec<f64>) -> Result<Self, InvalidInput> {
        check_finite(&values)?;
        Ok(Self { values })
    }

    /// Copies `values` into a new buffer, see [`SeriesBuffer::new`].
    pub fn from_slice(values: &[f64]) -> Result<Self, InvalidInput> {
        check_finite(values)?;
        Ok(Self {
            values: values.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Iterates over `(index, value)` points.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().copied().enumerate()
    }
}

impl TryFrom<Vec<f64>> for SeriesBuffer {
    type Error = InvalidInput;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl TryFrom<&[f64]> for SeriesBuffer {
    type Error = InvalidInput;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

impl AsRef<[f64]> for SeriesBuffer {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

pub(crate) fn check_finite(values: &[f64]) -> Result<(), InvalidInput> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(InvalidInput::NonFiniteValue {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}
