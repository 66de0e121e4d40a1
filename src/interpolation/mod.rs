//! Piecewise-linear interpolation primitives for policy functions
//!
//! The solvers represent every policy and value function as a composition of
//! a small closed set of interpolant types:
//! - [`LinearInterp`]: 1D piecewise-linear with endpoint-slope extrapolation
//! - [`BilinearInterp`]: 2D piecewise-bilinear over a rectangular node grid
//! - [`StackedInterp`]: 2D function built from 1D cross-sections indexed by a
//!   secondary grid
//! - [`BoundedSurface`]: a surface with a state-dependent lower bound on its
//!   first argument, below which queries are invalid (NaN)
//!
//! Construction validates node grids up front; evaluation never fails.

mod bilinear;
mod bounded;
mod linear;
mod stacked;

pub use bilinear::BilinearInterp;
pub use bounded::{BalanceFloor, BoundedSurface, Surface};
pub use linear::LinearInterp;
pub use stacked::StackedInterp;

use thiserror::Error;

/// Errors raised when constructing an interpolant from invalid node grids.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid lengths must match ({xs} nodes vs {ys} values)")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("at least {min} nodes are required, got {got}")]
    TooFewNodes { min: usize, got: usize },

    #[error("grid nodes must be strictly increasing")]
    NotIncreasing,

    #[error("grid nodes and values must be finite")]
    NonFinite,
}

/// Check an abscissa grid: finite, strictly increasing, at least `min` nodes.
pub(crate) fn validate_grid(xs: &[f64], min: usize) -> Result<(), GridError> {
    if xs.len() < min {
        return Err(GridError::TooFewNodes {
            min,
            got: xs.len(),
        });
    }
    if xs.iter().any(|v| !v.is_finite()) {
        return Err(GridError::NonFinite);
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(GridError::NotIncreasing);
    }
    Ok(())
}

/// Locate the interpolation segment for a query point.
///
/// Returns the left node index and the (unclamped) barycentric weight of the
/// right node; weights outside [0, 1] extrapolate linearly with the slope of
/// the nearest segment. A single-node grid pins the query to that node.
pub(crate) fn segment(grid: &[f64], q: f64) -> (usize, f64) {
    if grid.len() == 1 {
        return (0, 0.0);
    }
    let i = grid.partition_point(|v| *v <= q).clamp(1, grid.len() - 1) - 1;
    let w = (q - grid[i]) / (grid[i + 1] - grid[i]);
    (i, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_grid_rejects_descending() {
        assert_eq!(
            validate_grid(&[0.0, 2.0, 1.0], 2),
            Err(GridError::NotIncreasing)
        );
    }

    #[test]
    fn test_validate_grid_rejects_nan() {
        assert_eq!(validate_grid(&[0.0, f64::NAN], 2), Err(GridError::NonFinite));
    }

    #[test]
    fn test_segment_interior_and_extrapolation() {
        let grid = [0.0, 1.0, 3.0];
        assert_eq!(segment(&grid, 0.5), (0, 0.5));
        let (i, w) = segment(&grid, 2.0);
        assert_eq!(i, 1);
        assert!((w - 0.5).abs() < 1e-12);
        // Beyond the last node the weight exceeds one.
        let (i, w) = segment(&grid, 5.0);
        assert_eq!(i, 1);
        assert!(w > 1.0);
        // Before the first node the weight is negative.
        let (i, w) = segment(&grid, -1.0);
        assert_eq!(i, 0);
        assert!(w < 0.0);
    }
}
