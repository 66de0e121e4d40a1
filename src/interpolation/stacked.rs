//! 2D interpolation from stacked 1D cross-sections

use super::{segment, validate_grid, GridError};
use super::LinearInterp;

/// 2D function assembled from 1D interpolants indexed by a secondary grid.
///
/// `value(x, y)` evaluates the two cross-sections bracketing `y` at `x` and
/// blends them linearly; beyond the ends of the secondary grid the blend
/// extrapolates with the nearest pair of sections. A single section makes the
/// function constant in `y`.
#[derive(Debug, Clone)]
pub struct StackedInterp {
    sections: Vec<LinearInterp>,
    ys: Vec<f64>,
}

impl StackedInterp {
    pub fn new(sections: Vec<LinearInterp>, ys: Vec<f64>) -> Result<Self, GridError> {
        if sections.len() != ys.len() {
            return Err(GridError::LengthMismatch {
                xs: ys.len(),
                ys: sections.len(),
            });
        }
        validate_grid(&ys, 1)?;
        Ok(Self { sections, ys })
    }

    /// Interpolated (or extrapolated) value at `(x, y)`.
    pub fn value(&self, x: f64, y: f64) -> f64 {
        let (j, w) = segment(&self.ys, y);
        let lo = self.sections[j].value(x);
        if self.sections.len() == 1 {
            return lo;
        }
        let hi = self.sections[j + 1].value(x);
        lo + w * (hi - lo)
    }
}
