//! Closed-form solution for the final period
//!
//! With no future to save for, the agent consumes all available resources.
//! Leisure follows the static optimality condition between consumption and
//! leisure, capped at full leisure, and the surfaces are tabulated on the
//! (bank balance, transitory shock) node grid.

use crate::interpolation::{BalanceFloor, BilinearInterp, BoundedSurface, Surface};
use crate::utility;

use super::error::SolverError;
use super::solution::{MargValueFunc2D, PeriodSolution, ValueFunc2D};

/// Inputs for the terminal-period solve.
#[derive(Debug, Clone)]
pub struct TerminalProblem<'a> {
    /// Transitory-shock interpolation nodes.
    pub tran_shk_grid: &'a [f64],
    /// Wage rate in the final period.
    pub wage_rte: f64,
    /// Labor disutility curvature (alpha).
    pub lbr_cost: f64,
    /// Coefficient of relative risk aversion.
    pub crra: f64,
    /// End-of-period asset grid; a node at zero is prepended to form the
    /// bank-balance grid.
    pub asset_grid: &'a [f64],
}

impl TerminalProblem<'_> {
    pub fn solve(&self) -> Result<PeriodSolution, SolverError> {
        let alpha = self.lbr_cost;
        let n_shk = self.tran_shk_grid.len();

        let mut b_grid = Vec::with_capacity(self.asset_grid.len() + 1);
        b_grid.push(0.0);
        b_grid.extend_from_slice(self.asset_grid);
        let n_b = b_grid.len();

        let mut consumption = vec![vec![0.0; n_shk]; n_b];
        let mut labor = vec![vec![0.0; n_shk]; n_b];
        let mut x_eff = vec![vec![0.0; n_shk]; n_b];
        let mut vp_nvrs = vec![vec![0.0; n_shk]; n_b];

        for (i, &b) in b_grid.iter().enumerate() {
            for (j, &theta) in self.tran_shk_grid.iter().enumerate() {
                // With neither wealth nor labor income there is nothing to
                // trade leisure against.
                let leisure = if theta == 0.0 && b == 0.0 {
                    1.0
                } else {
                    let unconstrained =
                        alpha / (1.0 + alpha) * (b / (self.wage_rte * theta) + 1.0);
                    unconstrained.min(1.0)
                };
                let lbr = 1.0 - leisure;
                let c = b + lbr * self.wage_rte * theta;
                let x = leisure.powf(alpha) * c;
                let vp = leisure.powf(alpha) * utility::marginal_utility(x, self.crra);

                consumption[i][j] = c;
                labor[i][j] = lbr;
                x_eff[i][j] = x;
                vp_nvrs[i][j] = utility::marginal_utility_inv(vp, self.crra);
            }
        }

        let tran_grid = self.tran_shk_grid.to_vec();
        let c_func = BilinearInterp::new(consumption, b_grid.clone(), tran_grid.clone())?;
        let lbr_func = BilinearInterp::new(labor, b_grid.clone(), tran_grid.clone())?;
        let x_func = BilinearInterp::new(x_eff, b_grid.clone(), tran_grid.clone())?;
        let vp_nvrs_func = BilinearInterp::new(vp_nvrs, b_grid, tran_grid)?;

        let floor = BalanceFloor::Constant(0.0);
        Ok(PeriodSolution::terminal(
            BoundedSurface::new(Surface::Bilinear(c_func), floor.clone()),
            BoundedSurface::new(Surface::Bilinear(lbr_func), floor.clone()),
            MargValueFunc2D::new(
                BoundedSurface::new(Surface::Bilinear(vp_nvrs_func), floor.clone()),
                self.crra,
            ),
            floor,
            ValueFunc2D::new(Surface::Bilinear(x_func), self.crra),
        ))
    }
}
