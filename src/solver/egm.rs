//! One-period solver using the endogenous grid method
//!
//! Given the next period's solution, the solver inverts the first-order
//! condition on a fixed grid of end-of-period assets instead of root-finding
//! at every state:
//!
//! 1. Integrate the next period's marginal value over the transitory shock
//!    distribution once, and keep it as a 1D function of next-period
//!    balances; every permanent-shock branch reuses it.
//! 2. Weight the permanent-shock branches to get the end-of-period marginal
//!    value of assets.
//! 3. Invert through the effective-consumption composite `x = z^alpha * c`,
//!    which collapses the consumption and leisure conditions into one, and
//!    recover the bank balance that would have produced each asset level
//!    from the budget identity.
//! 4. Interpolate the resulting policies per transitory-shock node, stack
//!    them across the shock grid, and bound them below by the natural
//!    borrowing limit.
//!
//! The inversion is exact at the gridpoints; no numerical search runs
//! anywhere in the period solve.

use crate::interpolation::{
    BalanceFloor, BoundedSurface, LinearInterp, StackedInterp, Surface,
};
use crate::model::{DiscreteDistribution, InterpKind};
use crate::utility;

use super::error::SolverError;
use super::solution::{MargValueFunc1D, MargValueFunc2D, PeriodSolution};

/// One period of the lifecycle problem, ready to solve.
#[derive(Debug, Clone)]
pub struct PeriodProblem<'a> {
    /// Solution to the following period.
    pub solution_next: &'a PeriodSolution,
    /// Permanent productivity shock distribution for this period.
    pub perm_shk_dstn: &'a DiscreteDistribution,
    /// Transitory productivity shock distribution for this period.
    pub tran_shk_dstn: &'a DiscreteDistribution,
    /// Survival probability into the next period.
    pub liv_prb: f64,
    /// Intertemporal discount factor.
    pub disc_fac: f64,
    /// Coefficient of relative risk aversion.
    pub crra: f64,
    /// Gross risk-free return on retained assets.
    pub rfree: f64,
    /// Permanent income growth factor for next period.
    pub perm_gro_fac: f64,
    /// Wage rate.
    pub wage_rte: f64,
    /// Labor disutility curvature (alpha).
    pub lbr_cost: f64,
    /// End-of-period asset grid (strictly increasing, positive).
    pub asset_grid: &'a [f64],
    /// Transitory-shock interpolation nodes.
    pub tran_shk_grid: &'a [f64],
    /// Artificial borrowing constraint. Unsupported; must be None.
    pub boro_cnst: Option<f64>,
    /// Request an interior value function. Unsupported; must be false.
    pub value_func: bool,
    /// Interpolation scheme. Cubic is unsupported.
    pub interp: InterpKind,
}

/// Policy arrays on the endogenous gridpoints, one row per asset node plus
/// the zero-consumption lower-envelope row, one column per transitory shock.
struct EndogenousArrays {
    balances: Vec<Vec<f64>>,
    consumption: Vec<Vec<f64>>,
    labor: Vec<Vec<f64>>,
    vp_nvrs: Vec<Vec<f64>>,
    end_of_prd_vp: Vec<f64>,
}

impl PeriodProblem<'_> {
    pub fn solve(&self) -> Result<PeriodSolution, SolverError> {
        let alpha = self.lbr_cost;
        let bound = alpha / (1.0 + alpha);

        if self.crra <= bound {
            return Err(SolverError::RiskAversionTooLow {
                crra: self.crra,
                bound,
            });
        }
        if self.boro_cnst.is_some() {
            return Err(SolverError::BorrowingConstraintUnsupported);
        }
        if self.value_func {
            return Err(SolverError::ValueFunctionUnsupported);
        }
        if self.interp == InterpKind::Cubic {
            return Err(SolverError::CubicInterpolationUnsupported);
        }

        let arrays = self.endogenous_arrays()?;
        self.assemble(arrays)
    }

    /// Steps 1-3: run the EGM inversion and tabulate policies on the
    /// endogenous bank-balance gridpoints.
    fn endogenous_arrays(&self) -> Result<EndogenousArrays, SolverError> {
        let alpha = self.lbr_cost;
        let frac = 1.0 / (1.0 + alpha);
        let alpha_frac = alpha * frac;
        let a_grid = self.asset_grid;
        let a_count = a_grid.len();
        let n_shk = self.tran_shk_grid.len();

        // Expected marginal value of next-period balances with transitory
        // risk integrated out, interpolated through its pseudo-inverse with
        // a forced node at zero assets.
        let mut b_next = Vec::with_capacity(a_count + 1);
        let mut vpbar_nvrs = Vec::with_capacity(a_count + 1);
        b_next.push(0.0);
        vpbar_nvrs.push(0.0);
        for &a in a_grid {
            let b = self.rfree * a;
            let expected: f64 = self
                .tran_shk_dstn
                .outcomes()
                .map(|(p, theta)| p * self.solution_next.marginal_value(b, theta))
                .sum();
            b_next.push(b);
            vpbar_nvrs.push(utility::marginal_utility_inv(expected, self.crra));
        }
        let vpbar_func =
            MargValueFunc1D::new(LinearInterp::new(b_next, vpbar_nvrs)?, self.crra);

        // End-of-period marginal value of assets: each permanent-shock branch
        // reprices normalized wealth by (growth * shock)^(-crra).
        let discount = self.disc_fac * self.rfree * self.liv_prb;
        let end_of_prd_vp: Vec<f64> = a_grid
            .iter()
            .map(|&a| {
                let expected: f64 = self
                    .perm_shk_dstn
                    .outcomes()
                    .map(|(p, psi)| {
                        let growth = self.perm_gro_fac * psi;
                        p * growth.powf(-self.crra) * vpbar_func.value(self.rfree / growth * a)
                    })
                    .sum();
                discount * expected
            })
            .collect();

        // Invert the first-order condition in effective consumption. The
        // shock-dependent scale factor comes from collapsing the two FOCs.
        let scale_fac: Vec<f64> = self
            .tran_shk_grid
            .iter()
            .map(|&theta| {
                frac * (self.wage_rte * theta).powf(alpha_frac)
                    * (alpha.powf(-alpha_frac) + alpha.powf(frac))
            })
            .collect();
        let exponent = -1.0 / (self.crra - alpha_frac);

        let n_rows = a_count + 1;
        let mut balances = vec![vec![0.0; n_shk]; n_rows];
        let mut consumption = vec![vec![0.0; n_shk]; n_rows];
        let mut labor = vec![vec![0.0; n_shk]; n_rows];
        let mut vp_nvrs = vec![vec![0.0; n_shk]; n_rows];

        // Zero-consumption lower-envelope row: the natural borrowing limit
        // per shock, reached by working full time (not at all when the shock
        // is zero, since labor then earns nothing).
        for (j, &theta) in self.tran_shk_grid.iter().enumerate() {
            balances[0][j] = -self.wage_rte * theta;
            labor[0][j] = if theta == 0.0 { 0.0 } else { 1.0 };
        }

        for (i, &a) in a_grid.iter().enumerate() {
            let vp = end_of_prd_vp[i];
            let vp_inv = utility::marginal_utility_inv(vp, self.crra);
            for (j, &theta) in self.tran_shk_grid.iter().enumerate() {
                let (c, leisure) = if theta == 0.0 {
                    // Zero transitory income: no labor margin, consumption
                    // comes straight from the end-of-period marginal value.
                    (vp_inv, 1.0)
                } else {
                    let x = (vp * scale_fac[j]).powf(exponent);
                    let x_pow = x.powf(frac);
                    let leisure = (alpha / (self.wage_rte * theta)).powf(frac) * x_pow;
                    if leisure > 1.0 {
                        // Corner: negative labor is infeasible, so the
                        // interior inversion is discarded outright.
                        (vp_inv, 1.0)
                    } else {
                        let c = (self.wage_rte * theta / alpha).powf(alpha_frac) * x_pow;
                        (c, leisure)
                    }
                };
                if !(c.is_finite() && leisure.is_finite()) {
                    return Err(SolverError::NumericalDegeneracy { index: i, theta });
                }
                let row = i + 1;
                consumption[row][j] = c;
                labor[row][j] = 1.0 - leisure;
                vp_nvrs[row][j] = vp_inv;
                // Budget identity pins down the endogenous balance.
                balances[row][j] =
                    a - self.wage_rte * theta + c + self.wage_rte * theta * leisure;
            }
        }

        Ok(EndogenousArrays {
            balances,
            consumption,
            labor,
            vp_nvrs,
            end_of_prd_vp,
        })
    }

    /// Step 4: build per-shock interpolants over balances shifted to start
    /// at zero, stack them across the shock grid, and bound them below by
    /// the per-shock minimum balance.
    fn assemble(&self, arrays: EndogenousArrays) -> Result<PeriodSolution, SolverError> {
        let n_shk = self.tran_shk_grid.len();
        let n_rows = arrays.balances.len();

        let mut c_funcs = Vec::with_capacity(n_shk);
        let mut lbr_funcs = Vec::with_capacity(n_shk);
        let mut vp_nvrs_funcs = Vec::with_capacity(n_shk);
        for j in 0..n_shk {
            let b_min = arrays.balances[0][j];
            let shifted: Vec<f64> = (0..n_rows)
                .map(|i| arrays.balances[i][j] - b_min)
                .collect();
            c_funcs.push(LinearInterp::new(
                shifted.clone(),
                column(&arrays.consumption, j),
            )?);
            lbr_funcs.push(LinearInterp::new(shifted.clone(), column(&arrays.labor, j))?);
            vp_nvrs_funcs.push(LinearInterp::new(shifted, column(&arrays.vp_nvrs, j))?);
        }

        let tran_grid = self.tran_shk_grid.to_vec();
        let min_balance = if n_shk == 1 {
            BalanceFloor::Constant(arrays.balances[0][0])
        } else {
            BalanceFloor::Varying(LinearInterp::new(
                tran_grid.clone(),
                arrays.balances[0].clone(),
            )?)
        };

        let consumption = BoundedSurface::new(
            Surface::Stacked(StackedInterp::new(c_funcs, tran_grid.clone())?),
            min_balance.clone(),
        );
        let labor = BoundedSurface::new(
            Surface::Stacked(StackedInterp::new(lbr_funcs, tran_grid.clone())?),
            min_balance.clone(),
        );
        // Envelope condition: the marginal value of balances is the forward
        // CRRA transform of the interpolated pseudo-inverse.
        let marginal_value = MargValueFunc2D::new(
            BoundedSurface::new(
                Surface::Stacked(StackedInterp::new(vp_nvrs_funcs, tran_grid)?),
                min_balance.clone(),
            ),
            self.crra,
        );

        Ok(PeriodSolution::interior(
            consumption,
            labor,
            marginal_value,
            min_balance,
        ))
    }
}

fn column(rows: &[Vec<f64>], j: usize) -> Vec<f64> {
    rows.iter().map(|r| r[j]).collect()
}
