//! Backward induction across the lifecycle
//!
//! Seeds the final period with the closed-form terminal solution, then walks
//! time backwards, handing each period's solution to the preceding period's
//! EGM solve. Periods depend strictly on their successor, so any failure
//! stops the whole solve.

use log::{debug, info};

use crate::model::ModelParams;
use crate::solver::{PeriodProblem, PeriodSolution, SolverError, TerminalProblem};

/// Finite-horizon lifecycle solver.
pub struct LifecycleSolver {
    params: ModelParams,
}

impl LifecycleSolver {
    /// Validate the parameterization up front; unsupported model variants
    /// are rejected here rather than mid-solve.
    pub fn new(params: ModelParams) -> Result<Self, SolverError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Solve every period. The result is in forward time order with the
    /// terminal solution last.
    pub fn solve(&self) -> Result<Vec<PeriodSolution>, SolverError> {
        let params = &self.params;
        let asset_grid = params.asset_grid.build();
        let tran_shk_dstn = params.income.tran_shk_dstn()?;
        let perm_shk_dstn = params.income.perm_shk_dstn()?;
        let tran_shk_grid = tran_shk_dstn.values().to_vec();

        let t_last = params.periods - 1;
        info!(
            "solving {} periods by backward induction ({} asset nodes, {} transitory shocks)",
            params.periods,
            asset_grid.len(),
            tran_shk_grid.len()
        );

        let terminal = TerminalProblem {
            tran_shk_grid: &tran_shk_grid,
            wage_rte: params.wage_rte_at(t_last),
            lbr_cost: params.lbr_cost_at(t_last),
            crra: params.crra,
            asset_grid: &asset_grid,
        }
        .solve()?;

        // Collected backwards, reversed at the end.
        let mut solutions = Vec::with_capacity(params.periods);
        solutions.push(terminal);
        for t in (0..t_last).rev() {
            debug!("solving period {t}");
            let problem = PeriodProblem {
                solution_next: &solutions[solutions.len() - 1],
                perm_shk_dstn: &perm_shk_dstn,
                tran_shk_dstn: &tran_shk_dstn,
                liv_prb: params.liv_prb_at(t),
                disc_fac: params.disc_fac,
                crra: params.crra,
                rfree: params.rfree,
                perm_gro_fac: params.perm_gro_fac_at(t),
                wage_rte: params.wage_rte_at(t),
                lbr_cost: params.lbr_cost_at(t),
                asset_grid: &asset_grid,
                tran_shk_grid: &tran_shk_grid,
                boro_cnst: params.boro_cnst,
                value_func: params.value_func,
                interp: params.interp,
            };
            let solved = problem.solve()?;
            solutions.push(solved);
        }
        solutions.reverse();
        Ok(solutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssetGridConfig;

    fn small_params() -> ModelParams {
        ModelParams {
            periods: 3,
            asset_grid: AssetGridConfig {
                max: 20.0,
                count: 48,
                ..AssetGridConfig::default()
            },
            ..ModelParams::default()
        }
    }

    #[test]
    fn test_solves_finite_lifecycle() {
        let solver = LifecycleSolver::new(small_params()).unwrap();
        let solutions = solver.solve().unwrap();
        assert_eq!(solutions.len(), 3);
        assert!(solutions[2].is_terminal());
        assert!(!solutions[0].is_terminal());
        assert!(!solutions[1].is_terminal());
    }

    #[test]
    fn test_rejects_invalid_params_at_construction() {
        let mut params = small_params();
        params.crra = 0.1; // below lbr_cost / (1 + lbr_cost) for alpha = 0.35
        assert!(matches!(
            LifecycleSolver::new(params),
            Err(SolverError::RiskAversionTooLow { .. })
        ));
    }

    #[test]
    fn test_policies_well_behaved_in_every_period() {
        let solver = LifecycleSolver::new(small_params()).unwrap();
        let solutions = solver.solve().unwrap();
        let tran = solver.params().income.tran_shk_dstn().unwrap();
        for solution in &solutions {
            for &theta in tran.values() {
                let b_min = solution.min_balance(theta);
                for k in 0..20 {
                    let b = b_min + 0.01 + 0.5 * k as f64;
                    let l = solution.labor(b, theta);
                    let c = solution.consumption(b, theta);
                    assert!((-1e-9..=1.0 + 1e-9).contains(&l));
                    assert!(c >= 0.0);
                    assert!(solution.marginal_value(b, theta) >= 0.0);
                }
            }
        }
    }
}
