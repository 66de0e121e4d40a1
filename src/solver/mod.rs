//! One-period solvers and solution records
//!
//! This module holds the numerical core of the crate:
//! - **Terminal solver**: closed-form policies for the final period, where
//!   the agent consumes everything and leisure follows a static trade-off
//! - **EGM solver**: one backward-induction step, inverting the first-order
//!   condition on a grid of end-of-period assets instead of root-finding at
//!   every state
//! - **Solution records**: immutable per-period bundles of consumption,
//!   labor, marginal-value, and minimum-balance functions
//!
//! Each period's solution is built exclusively from the following period's
//! solution and is read-only afterwards; errors abort the period solve
//! before any solution is constructed.

mod egm;
mod error;
mod solution;
mod terminal;

pub use egm::PeriodProblem;
pub use error::SolverError;
pub use solution::{MargValueFunc1D, MargValueFunc2D, PeriodSolution, ValueFunc2D};
pub use terminal::TerminalProblem;
