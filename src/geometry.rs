use nalgebra::DVector;

use crate::error::{Result, SkewError};

/// Statistics of a straight-line fit of edge columns against edge rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionSummary {
    pub row_mean: f64,
    pub col_mean: f64,
    /// Population standard deviation of the row indices (σx)
    pub row_std_dev: f64,
    /// Population standard deviation of the column indices (σy)
    pub col_std_dev: f64,
    /// Pearson correlation coefficient, in [-1, 1]
    pub correlation: f64,
    /// Columns advanced per row: `correlation * col_std_dev / row_std_dev`
    pub slope: f64,
}

/// Outcome of fitting a line to the left edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fit {
    /// Every point shares one column; the edge is already upright
    Vertical,
    Slope(RegressionSummary),
}

/// Fit column indices against row indices by least squares.
///
/// Column variance is checked before anything else is derived, so an
/// upright edge yields [`Fit::Vertical`] even when the row variance is zero
/// as well (a single point).
pub fn compute_slope(rows: &[usize], cols: &[usize]) -> Result<Fit> {
    if rows.len() != cols.len() {
        return Err(SkewError::LengthMismatch {
            rows: rows.len(),
            cols: cols.len(),
        });
    }
    if rows.is_empty() {
        return Err(SkewError::NoData);
    }

    let x = Centered::new(rows);
    let y = Centered::new(cols);

    // Coordinates are small integers, so identical values centre to exact zeros
    let col_std_dev = y.std_dev();
    if col_std_dev == 0.0 {
        return Ok(Fit::Vertical);
    }

    let row_std_dev = x.std_dev();
    if row_std_dev == 0.0 {
        return Err(SkewError::DegenerateRows);
    }

    let covariance = x.deviations.dot(&y.deviations) / rows.len() as f64;
    let correlation = covariance / (row_std_dev * col_std_dev);
    let slope = correlation * (col_std_dev / row_std_dev);

    Ok(Fit::Slope(RegressionSummary {
        row_mean: x.mean,
        col_mean: y.mean,
        row_std_dev,
        col_std_dev,
        correlation,
        slope,
    }))
}

/// Correction angle in whole degrees for an edge with the given slope:
/// `atan(1 / slope)`, rounded by [`round_degrees`].
///
/// The result lies in (-90, 90). A zero or non-finite slope has no angle.
pub fn resolve_angle(slope: f64) -> Result<i32> {
    if slope == 0.0 || !slope.is_finite() {
        return Err(SkewError::UndefinedAngle(slope));
    }
    Ok(round_degrees(slope.recip().atan().to_degrees()))
}

/// Round to the nearest whole degree, ties to even (44.5 -> 44, 45.5 -> 46)
pub fn round_degrees(degrees: f64) -> i32 {
    degrees.round_ties_even() as i32
}

/// Coordinates shifted by their mean
struct Centered {
    mean: f64,
    deviations: DVector<f64>,
}

impl Centered {
    fn new(values: &[usize]) -> Self {
        let v = DVector::from_iterator(values.len(), values.iter().map(|&v| v as f64));
        let mean = v.sum() / values.len() as f64;
        Self {
            mean,
            deviations: v.add_scalar(-mean),
        }
    }

    /// Population standard deviation (divisor N)
    fn std_dev(&self) -> f64 {
        (self.deviations.norm_squared() / self.deviations.len() as f64).sqrt()
    }
}
