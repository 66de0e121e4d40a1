//! One-period solution records
//!
//! A [`PeriodSolution`] bundles the policy and value functions for a single
//! period: consumption, labor supply, the marginal value of bank balances,
//! and the shock-dependent minimum balance below which no solution exists.
//! Marginal value is stored through its pseudo-inverse (the inverse marginal
//! utility of the marginal value), which is nearly linear in balances and
//! therefore interpolates accurately; the forward CRRA transform recovers
//! the marginal value itself.

use crate::interpolation::{BalanceFloor, BoundedSurface, LinearInterp, Surface};
use crate::utility;

/// 1D marginal value function represented through its pseudo-inverse.
#[derive(Debug, Clone)]
pub struct MargValueFunc1D {
    pseudo: LinearInterp,
    crra: f64,
}

impl MargValueFunc1D {
    pub fn new(pseudo: LinearInterp, crra: f64) -> Self {
        Self { pseudo, crra }
    }

    pub fn value(&self, b: f64) -> f64 {
        utility::marginal_utility(self.pseudo.value(b), self.crra)
    }
}

/// 2D marginal value function over (bank balances, transitory shock).
#[derive(Debug, Clone)]
pub struct MargValueFunc2D {
    pseudo: BoundedSurface,
    crra: f64,
}

impl MargValueFunc2D {
    pub fn new(pseudo: BoundedSurface, crra: f64) -> Self {
        Self { pseudo, crra }
    }

    pub fn value(&self, b: f64, theta: f64) -> f64 {
        utility::marginal_utility(self.pseudo.value(b, theta), self.crra)
    }

    /// The interpolated pseudo-inverse itself.
    pub fn pseudo_inverse(&self, b: f64, theta: f64) -> f64 {
        self.pseudo.value(b, theta)
    }
}

/// Level value function over (bank balances, transitory shock), stored
/// through effective consumption. Only the terminal period carries one.
#[derive(Debug, Clone)]
pub struct ValueFunc2D {
    x_eff: Surface,
    crra: f64,
}

impl ValueFunc2D {
    pub fn new(x_eff: Surface, crra: f64) -> Self {
        Self { x_eff, crra }
    }

    pub fn value(&self, b: f64, theta: f64) -> f64 {
        utility::utility(self.x_eff.value(b, theta), self.crra)
    }
}

/// Immutable solution to one period of the labor-consumption problem.
///
/// All policy functions are defined only for `b >= min_balance(theta)`;
/// queries below the bound return NaN.
#[derive(Debug, Clone)]
pub struct PeriodSolution {
    consumption: BoundedSurface,
    labor: BoundedSurface,
    marginal_value: MargValueFunc2D,
    min_balance: BalanceFloor,
    value: Option<ValueFunc2D>,
}

impl PeriodSolution {
    /// Solution for a non-terminal period (no level value function).
    pub fn interior(
        consumption: BoundedSurface,
        labor: BoundedSurface,
        marginal_value: MargValueFunc2D,
        min_balance: BalanceFloor,
    ) -> Self {
        Self {
            consumption,
            labor,
            marginal_value,
            min_balance,
            value: None,
        }
    }

    /// Terminal-period solution, which additionally carries the closed-form
    /// value function.
    pub fn terminal(
        consumption: BoundedSurface,
        labor: BoundedSurface,
        marginal_value: MargValueFunc2D,
        min_balance: BalanceFloor,
        value: ValueFunc2D,
    ) -> Self {
        Self {
            consumption,
            labor,
            marginal_value,
            min_balance,
            value: Some(value),
        }
    }

    /// Normalized consumption at bank balances `b` and transitory shock
    /// `theta`.
    pub fn consumption(&self, b: f64, theta: f64) -> f64 {
        self.consumption.value(b, theta)
    }

    /// Labor supply in [0, 1].
    pub fn labor(&self, b: f64, theta: f64) -> f64 {
        self.labor.value(b, theta)
    }

    /// Marginal value of bank balances.
    pub fn marginal_value(&self, b: f64, theta: f64) -> f64 {
        self.marginal_value.value(b, theta)
    }

    /// Pseudo-inverse marginal value (the interpolated quantity).
    pub fn marginal_value_pseudo_inverse(&self, b: f64, theta: f64) -> f64 {
        self.marginal_value.pseudo_inverse(b, theta)
    }

    /// Lowest bank balance at which the period's functions are defined.
    pub fn min_balance(&self, theta: f64) -> f64 {
        self.min_balance.value(theta)
    }

    /// Level value, present on the terminal solution only.
    pub fn value(&self, b: f64, theta: f64) -> Option<f64> {
        self.value.as_ref().map(|v| v.value(b, theta))
    }

    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }
}
