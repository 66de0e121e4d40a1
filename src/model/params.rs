//! Model parameterization
//!
//! All solver inputs live in explicit immutable structs: preferences and
//! prices, per-period sequences, and the grid/shock settings. Parameters can
//! be loaded from JSON or built from the in-memory default calibration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::grids::AssetGridConfig;
use super::shocks::{DiscreteDistribution, DistributionError};
use crate::solver::SolverError;

/// Interpolation scheme for the policy functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum InterpKind {
    #[default]
    Linear,
    /// Not supported by the solver; requesting it is a configuration error.
    Cubic,
}

/// Settings for the permanent and transitory income-shock distributions.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct IncomeProcessConfig {
    /// Number of transitory shock points (before the unemployment outcome).
    pub tran_shk_count: usize,
    /// Log standard deviation of the transitory shock.
    pub tran_shk_sigma: f64,
    /// Probability of the unemployment outcome.
    pub unemp_prb: f64,
    /// Transitory income while unemployed.
    pub inc_unemp: f64,
    /// Number of permanent shock points.
    pub perm_shk_count: usize,
    /// Log standard deviation of the permanent shock.
    pub perm_shk_sigma: f64,
}

impl Default for IncomeProcessConfig {
    fn default() -> Self {
        Self {
            tran_shk_count: 15,
            tran_shk_sigma: 0.1,
            unemp_prb: 0.05,
            inc_unemp: 0.0,
            perm_shk_count: 16,
            perm_shk_sigma: 0.1,
        }
    }
}

impl IncomeProcessConfig {
    /// Transitory shock distribution, with the unemployment outcome mixed in
    /// first when its probability is positive.
    pub fn tran_shk_dstn(&self) -> Result<DiscreteDistribution, DistributionError> {
        let base = DiscreteDistribution::lognormal(self.tran_shk_count, self.tran_shk_sigma)?;
        if self.unemp_prb > 0.0 {
            base.with_outcome_constant_mean(self.inc_unemp, self.unemp_prb)
        } else {
            Ok(base)
        }
    }

    pub fn perm_shk_dstn(&self) -> Result<DiscreteDistribution, DistributionError> {
        DiscreteDistribution::lognormal(self.perm_shk_count, self.perm_shk_sigma)
    }
}

/// Full parameterization of a finite-horizon lifecycle.
///
/// Per-period sequences must either have one entry per non-terminal period
/// (`periods` entries) or a single entry applied to every period.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Coefficient of relative risk aversion.
    pub crra: f64,
    /// Intertemporal discount factor.
    pub disc_fac: f64,
    /// Gross risk-free return on retained assets.
    pub rfree: f64,
    /// Number of periods, terminal period included.
    pub periods: usize,
    /// Survival probability into the next period.
    pub liv_prb: Vec<f64>,
    /// Permanent income growth factor.
    pub perm_gro_fac: Vec<f64>,
    /// Wage rate.
    pub wage_rte: Vec<f64>,
    /// Labor disutility curvature (alpha).
    pub lbr_cost: Vec<f64>,
    /// End-of-period asset grid settings.
    pub asset_grid: AssetGridConfig,
    /// Income shock process settings.
    pub income: IncomeProcessConfig,
    /// Artificial borrowing constraint. Unsupported; must be None.
    pub boro_cnst: Option<f64>,
    /// Request interior value functions. Unsupported; must be false.
    pub value_func: bool,
    /// Policy interpolation scheme. Cubic is unsupported.
    pub interp: InterpKind,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            crra: 2.0,
            disc_fac: 0.96,
            rfree: 1.03,
            periods: 40,
            liv_prb: vec![0.98],
            perm_gro_fac: vec![1.01],
            wage_rte: vec![1.0],
            lbr_cost: vec![0.35],
            asset_grid: AssetGridConfig::default(),
            income: IncomeProcessConfig::default(),
            boro_cnst: None,
            value_func: false,
            interp: InterpKind::Linear,
        }
    }
}

impl ModelParams {
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let params: ModelParams = serde_json::from_reader(BufReader::new(file))?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_str(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let params: ModelParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn liv_prb_at(&self, t: usize) -> f64 {
        per_period(&self.liv_prb, t)
    }

    pub fn perm_gro_fac_at(&self, t: usize) -> f64 {
        per_period(&self.perm_gro_fac, t)
    }

    pub fn wage_rte_at(&self, t: usize) -> f64 {
        per_period(&self.wage_rte, t)
    }

    pub fn lbr_cost_at(&self, t: usize) -> f64 {
        per_period(&self.lbr_cost, t)
    }

    /// Reject parameterizations the solver cannot handle before any
    /// computation starts.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.periods == 0 {
            return Err(invalid("periods", "must be at least 1"));
        }
        for (name, seq) in [
            ("liv_prb", &self.liv_prb),
            ("perm_gro_fac", &self.perm_gro_fac),
            ("wage_rte", &self.wage_rte),
            ("lbr_cost", &self.lbr_cost),
        ] {
            if seq.is_empty() || (seq.len() != 1 && seq.len() != self.periods) {
                return Err(invalid(name, "must have 1 entry or one per period"));
            }
            if seq.iter().any(|v| !v.is_finite()) {
                return Err(invalid(name, "entries must be finite"));
            }
        }
        if !(self.crra.is_finite() && self.crra > 0.0) {
            return Err(invalid("crra", "must be positive"));
        }
        for &alpha in &self.lbr_cost {
            if alpha <= 0.0 {
                return Err(invalid("lbr_cost", "must be positive"));
            }
            let bound = alpha / (1.0 + alpha);
            if self.crra <= bound {
                return Err(SolverError::RiskAversionTooLow {
                    crra: self.crra,
                    bound,
                });
            }
        }
        if self.disc_fac <= 0.0 || !self.disc_fac.is_finite() {
            return Err(invalid("disc_fac", "must be positive"));
        }
        if self.rfree <= 0.0 || !self.rfree.is_finite() {
            return Err(invalid("rfree", "must be positive"));
        }
        if self.liv_prb.iter().any(|p| *p <= 0.0 || *p > 1.0) {
            return Err(invalid("liv_prb", "must lie in (0, 1]"));
        }
        if self.wage_rte.iter().any(|w| *w <= 0.0) {
            return Err(invalid("wage_rte", "must be positive"));
        }
        if self.perm_gro_fac.iter().any(|g| *g <= 0.0) {
            return Err(invalid("perm_gro_fac", "must be positive"));
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
        let grid = self.asset_grid.build();
        if grid.len() < 2 || grid[0] <= 0.0 || grid.windows(2).any(|w| w[1] <= w[0]) {
            return Err(invalid(
                "asset_grid",
                "must build a strictly increasing positive grid",
            ));
        }
        let income = self.income;
        if income.tran_shk_count == 0 || income.perm_shk_count == 0 {
            return Err(invalid("income", "shock counts must be positive"));
        }
        if income.tran_shk_sigma < 0.0 || income.perm_shk_sigma < 0.0 {
            return Err(invalid("income", "shock sigmas must be non-negative"));
        }
        if !(0.0..1.0).contains(&income.unemp_prb) || income.inc_unemp < 0.0 {
            return Err(invalid("income", "invalid unemployment settings"));
        }
        Ok(())
    }
}

fn per_period(seq: &[f64], t: usize) -> f64 {
    if seq.len() == 1 {
        seq[0]
    } else {
        seq[t]
    }
}

fn invalid(name: &'static str, reason: &str) -> SolverError {
    SolverError::InvalidParameter {
        name,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_validates() {
        assert!(ModelParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_crra_at_curvature_bound() {
        let mut params = ModelParams::default();
        let alpha = params.lbr_cost[0];
        params.crra = alpha / (1.0 + alpha);
        assert!(matches!(
            params.validate(),
            Err(SolverError::RiskAversionTooLow { .. })
        ));
    }

    #[test]
    fn test_rejects_unsupported_variants() {
        let mut params = ModelParams::default();
        params.boro_cnst = Some(0.0);
        assert!(matches!(
            params.validate(),
            Err(SolverError::BorrowingConstraintUnsupported)
        ));

        let mut params = ModelParams::default();
        params.value_func = true;
        assert!(matches!(
            params.validate(),
            Err(SolverError::ValueFunctionUnsupported)
        ));

        let mut params = ModelParams::default();
        params.interp = InterpKind::Cubic;
        assert!(matches!(
            params.validate(),
            Err(SolverError::CubicInterpolationUnsupported)
        ));
    }

    #[test]
    fn test_per_period_broadcast() {
        let mut params = ModelParams::default();
        params.periods = 3;
        params.wage_rte = vec![1.0, 1.1, 1.2];
        assert!(params.validate().is_ok());
        assert_relative_eq!(params.wage_rte_at(2), 1.2, epsilon = 1e-12);
        // A single entry applies to every period.
        assert_relative_eq!(params.liv_prb_at(2), 0.98, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_wrong_sequence_length() {
        let mut params = ModelParams::default();
        params.periods = 3;
        params.wage_rte = vec![1.0, 1.1];
        assert!(matches!(
            params.validate(),
            Err(SolverError::InvalidParameter { name: "wage_rte", .. })
        ));
    }

    #[test]
    fn test_json_loading() {
        let params = ModelParams::from_json_str(
            r#"{"crra": 2.5, "periods": 5, "wage_rte": [1.25]}"#,
        )
        .unwrap();
        assert_relative_eq!(params.crra, 2.5, epsilon = 1e-12);
        assert_eq!(params.periods, 5);
        assert_relative_eq!(params.wage_rte_at(4), 1.25, epsilon = 1e-12);
        // Omitted fields come from the default calibration.
        assert_relative_eq!(params.disc_fac, 0.96, epsilon = 1e-12);
    }

    #[test]
    fn test_income_config_distributions() {
        let income = IncomeProcessConfig::default();
        let tran = income.tran_shk_dstn().unwrap();
        // Unemployment outcome sits first at zero income.
        assert_eq!(tran.len(), 16);
        assert_relative_eq!(tran.values()[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(tran.mean(), 1.0, epsilon = 1e-9);
        let perm = income.perm_shk_dstn().unwrap();
        assert_relative_eq!(perm.mean(), 1.0, epsilon = 1e-9);
    }
}
