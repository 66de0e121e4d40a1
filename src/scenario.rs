//! Batch solving of independent parameterizations
//!
//! Periods within one lifecycle must run in decreasing time order, but
//! separate parameterizations share nothing, so a batch of them solves in
//! parallel.

use rayon::prelude::*;

use crate::lifecycle::LifecycleSolver;
use crate::model::ModelParams;
use crate::solver::{PeriodSolution, SolverError};

/// Runner holding a base parameterization that scenario variants modify.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_params: ModelParams,
}

impl ScenarioRunner {
    /// Create a runner from the default calibration.
    pub fn new() -> Self {
        Self {
            base_params: ModelParams::default(),
        }
    }

    pub fn with_params(params: ModelParams) -> Self {
        Self {
            base_params: params,
        }
    }

    pub fn params(&self) -> &ModelParams {
        &self.base_params
    }

    /// Solve a single variant built by modifying the base parameters.
    pub fn run<F>(&self, modify: F) -> Result<Vec<PeriodSolution>, SolverError>
    where
        F: FnOnce(&mut ModelParams),
    {
        let mut params = self.base_params.clone();
        modify(&mut params);
        LifecycleSolver::new(params)?.solve()
    }

    /// Solve many parameterizations in parallel. Each variant succeeds or
    /// fails on its own.
    pub fn run_all(
        &self,
        variants: Vec<ModelParams>,
    ) -> Vec<Result<Vec<PeriodSolution>, SolverError>> {
        variants
            .into_par_iter()
            .map(|params| LifecycleSolver::new(params)?.solve())
            .collect()
    }

    /// Solve the base parameterization once per wage level.
    pub fn sweep_wage(&self, wages: &[f64]) -> Vec<Result<Vec<PeriodSolution>, SolverError>> {
        let variants = wages
            .iter()
            .map(|&w| {
                let mut params = self.base_params.clone();
                params.wage_rte = vec![w];
                params
            })
            .collect();
        self.run_all(variants)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
