//! 1D piecewise-linear interpolation

use super::{segment, validate_grid, GridError};

/// Piecewise-linear interpolant over a strictly increasing node grid.
///
/// Queries outside the node range extrapolate linearly with the slope of the
/// nearest segment.
#[derive(Debug, Clone)]
pub struct LinearInterp {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterp {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, GridError> {
        if xs.len() != ys.len() {
            return Err(GridError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        validate_grid(&xs, 2)?;
        if ys.iter().any(|v| !v.is_finite()) {
            return Err(GridError::NonFinite);
        }
        Ok(Self { xs, ys })
    }

    /// Interpolated (or extrapolated) value at `x`.
    pub fn value(&self, x: f64) -> f64 {
        let (i, w) = segment(&self.xs, x);
        self.ys[i] + w * (self.ys[i + 1] - self.ys[i])
    }

    /// Slope of the segment containing `x` (endpoint slope outside the grid).
    pub fn derivative(&self, x: f64) -> f64 {
        let (i, _) = segment(&self.xs, x);
        (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i])
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn interp() -> LinearInterp {
        LinearInterp::new(vec![0.0, 1.0, 3.0], vec![1.0, 2.0, 0.0]).unwrap()
    }

    #[test]
    fn test_interpolates_nodes() {
        let f = interp();
        assert_relative_eq!(f.value(0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(f.value(1.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(f.value(3.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_midpoint_value() {
        let f = interp();
        assert_relative_eq!(f.value(0.5), 1.5, epsilon = 1e-12);
        assert_relative_eq!(f.value(2.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_extrapolates_with_end_slope() {
        let f = interp();
        // Left slope is 1, right slope is -1.
        assert_relative_eq!(f.value(-1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(f.value(4.0), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_is_segment_slope() {
        let f = interp();
        assert_relative_eq!(f.derivative(0.5), 1.0, epsilon = 1e-12);
        assert_relative_eq!(f.derivative(2.0), -1.0, epsilon = 1e-12);
        assert_relative_eq!(f.derivative(10.0), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_bad_grids() {
        assert!(LinearInterp::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(LinearInterp::new(vec![1.0], vec![1.0]).is_err());
        assert!(LinearInterp::new(vec![1.0, 1.0], vec![0.0, 0.0]).is_err());
    }
}
