//! 2D piecewise-bilinear interpolation

use super::{segment, validate_grid, GridError};

/// Bilinear interpolant over a rectangular (x, y) node grid.
///
/// `values[i][j]` is the function value at `(xs[i], ys[j])`. Queries beyond
/// the edge cells extrapolate linearly. The secondary grid may consist of a
/// single node, in which case the surface is flat along that axis.
#[derive(Debug, Clone)]
pub struct BilinearInterp {
    values: Vec<Vec<f64>>,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl BilinearInterp {
    pub fn new(values: Vec<Vec<f64>>, xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, GridError> {
        validate_grid(&xs, 2)?;
        validate_grid(&ys, 1)?;
        if values.len() != xs.len() {
            return Err(GridError::LengthMismatch {
                xs: xs.len(),
                ys: values.len(),
            });
        }
        for row in &values {
            if row.len() != ys.len() {
                return Err(GridError::LengthMismatch {
                    xs: ys.len(),
                    ys: row.len(),
                });
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(GridError::NonFinite);
            }
        }
        Ok(Self { values, xs, ys })
    }

    /// Interpolated (or extrapolated) value at `(x, y)`.
    pub fn value(&self, x: f64, y: f64) -> f64 {
        let (i, wx) = segment(&self.xs, x);
        let (j, wy) = segment(&self.ys, y);
        let i1 = (i + 1).min(self.xs.len() - 1);
        let j1 = (j + 1).min(self.ys.len() - 1);
        let lo = self.values[i][j] + wx * (self.values[i1][j] - self.values[i][j]);
        let hi = self.values[i][j1] + wx * (self.values[i1][j1] - self.values[i][j1]);
        lo + wy * (hi - lo)
    }
}
