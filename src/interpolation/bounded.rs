//! Surfaces with a state-dependent lower bound

use super::{BilinearInterp, LinearInterp, StackedInterp};

/// Lowest admissible value of the first argument as a function of the second.
#[derive(Debug, Clone)]
pub enum BalanceFloor {
    /// The bound does not depend on the shock (terminal period).
    Constant(f64),
    /// The bound is interpolated across the shock grid.
    Varying(LinearInterp),
}

impl BalanceFloor {
    pub fn value(&self, theta: f64) -> f64 {
        match self {
            BalanceFloor::Constant(v) => *v,
            BalanceFloor::Varying(f) => f.value(theta),
        }
    }
}

/// The 2D interpolant variants produced by the solvers.
#[derive(Debug, Clone)]
pub enum Surface {
    Bilinear(BilinearInterp),
    Stacked(StackedInterp),
}

impl Surface {
    pub fn value(&self, x: f64, y: f64) -> f64 {
        match self {
            Surface::Bilinear(f) => f.value(x, y),
            Surface::Stacked(f) => f.value(x, y),
        }
    }
}

/// A surface defined only above a shock-dependent floor on its first argument.
///
/// Valid queries evaluate the wrapped surface at the floor-shifted abscissa
/// `x - floor(y)`; queries below the floor return NaN rather than an
/// extrapolated value, so misuse is detectable by the caller.
#[derive(Debug, Clone)]
pub struct BoundedSurface {
    surface: Surface,
    floor: BalanceFloor,
}

impl BoundedSurface {
    pub fn new(surface: Surface, floor: BalanceFloor) -> Self {
        Self { surface, floor }
    }

    pub fn value(&self, x: f64, y: f64) -> f64 {
        let lo = self.floor.value(y);
        if x < lo {
            return f64::NAN;
        }
        self.surface.value(x - lo, y)
    }

    pub fn floor(&self) -> &BalanceFloor {
        &self.floor
    }
}
