//! Solver error taxonomy
//!
//! Configuration errors mark unsupported model variants and abort before any
//! computation; grid and distribution errors surface invalid inputs; the
//! degeneracy variant reports non-finite intermediate values instead of
//! masking them. A failed solve never yields a period solution.

use thiserror::Error;

use crate::interpolation::GridError;
use crate::model::DistributionError;

#[derive(Debug, Error)]
pub enum SolverError {
    /// The labor-disutility curvature admits no interior optimum.
    #[error("risk aversion {crra} must strictly exceed lbr_cost / (1 + lbr_cost) = {bound}")]
    RiskAversionTooLow { crra: f64, bound: f64 },

    #[error("artificial borrowing constraints are not supported")]
    BorrowingConstraintUnsupported,

    #[error("interior value functions are not supported; disable value_func")]
    ValueFunctionUnsupported,

    #[error("cubic interpolation is not supported; use linear")]
    CubicInterpolationUnsupported,

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid interpolation grid: {0}")]
    Grid(#[from] GridError),

    #[error("invalid shock distribution: {0}")]
    Distribution(#[from] DistributionError),

    /// The effective-consumption inversion produced a non-finite policy
    /// value, which indicates a misconfigured grid or shock distribution.
    #[error("non-finite policy value at asset gridpoint {index}, transitory shock {theta}")]
    NumericalDegeneracy { index: usize, theta: f64 },
}
