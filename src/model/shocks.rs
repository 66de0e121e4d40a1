//! Discrete income-shock distributions
//!
//! Permanent and transitory productivity shocks are represented as finite
//! discrete distributions: matched (probability, outcome) sequences whose
//! mass must sum to one. The solver performs no renormalization, so a
//! distribution that does not integrate to one is rejected at construction.

use thiserror::Error;

/// Tolerance for the total probability mass check.
const MASS_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("probabilities and values must have equal length ({probs} vs {values})")]
    LengthMismatch { probs: usize, values: usize },

    #[error("distribution must have at least one outcome")]
    Empty,

    #[error("probabilities must be finite and non-negative")]
    InvalidProbability,

    #[error("probability mass sums to {sum}, expected 1")]
    MassNotOne { sum: f64 },

    #[error("outcome values must be finite")]
    InvalidValue,

    #[error("mixing probability must lie in [0, 1), got {prob}")]
    InvalidMixingProbability { prob: f64 },
}

/// A discrete distribution over a finite set of shock outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteDistribution {
    probs: Vec<f64>,
    values: Vec<f64>,
}

impl DiscreteDistribution {
    pub fn new(probs: Vec<f64>, values: Vec<f64>) -> Result<Self, DistributionError> {
        if probs.len() != values.len() {
            return Err(DistributionError::LengthMismatch {
                probs: probs.len(),
                values: values.len(),
            });
        }
        if probs.is_empty() {
            return Err(DistributionError::Empty);
        }
        if probs.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(DistributionError::InvalidProbability);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DistributionError::InvalidValue);
        }
        let sum: f64 = probs.iter().sum();
        if (sum - 1.0).abs() > MASS_TOLERANCE {
            return Err(DistributionError::MassNotOne { sum });
        }
        Ok(Self { probs, values })
    }

    /// Single-outcome distribution with all mass on `value`.
    pub fn degenerate(value: f64) -> Self {
        Self {
            probs: vec![1.0],
            values: vec![value],
        }
    }

    /// Equiprobable discretization of a mean-one lognormal with log standard
    /// deviation `sigma`: each of the `n` points is the conditional mean of
    /// its probability bin, so the discretized mean is exactly one.
    pub fn lognormal(n: usize, sigma: f64) -> Result<Self, DistributionError> {
        if n == 0 {
            return Err(DistributionError::Empty);
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(DistributionError::InvalidValue);
        }
        if n == 1 || sigma == 0.0 {
            return Ok(Self::degenerate(1.0));
        }
        // Shifted bin-edge CDF values telescope, so the weighted mean of the
        // conditional means is one by construction.
        let mut cuts = Vec::with_capacity(n + 1);
        cuts.push(0.0);
        for i in 1..n {
            cuts.push(norm_cdf(norm_ppf(i as f64 / n as f64) - sigma));
        }
        cuts.push(1.0);
        let values = (0..n)
            .map(|i| n as f64 * (cuts[i + 1] - cuts[i]))
            .collect();
        Self::new(vec![1.0 / n as f64; n], values)
    }

    /// Mix in an extra outcome with probability `prob`, rescaling the
    /// existing outcomes so the distribution mean is unchanged. The new
    /// outcome is prepended, which keeps a zero-income outcome first.
    pub fn with_outcome_constant_mean(
        &self,
        value: f64,
        prob: f64,
    ) -> Result<Self, DistributionError> {
        if !prob.is_finite() || !(0.0..1.0).contains(&prob) {
            return Err(DistributionError::InvalidMixingProbability { prob });
        }
        let mean = self.mean();
        let scale = (mean - prob * value) / ((1.0 - prob) * mean);
        let mut probs = Vec::with_capacity(self.probs.len() + 1);
        probs.push(prob);
        probs.extend(self.probs.iter().map(|p| p * (1.0 - prob)));
        let mut values = Vec::with_capacity(self.values.len() + 1);
        values.push(value);
        values.extend(self.values.iter().map(|v| v * scale));
        Self::new(probs, values)
    }

    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Iterate over (probability, outcome) pairs.
    pub fn outcomes(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.probs.iter().copied().zip(self.values.iter().copied())
    }

    pub fn mean(&self) -> f64 {
        self.outcomes().map(|(p, v)| p * v).sum()
    }
}

/// Standard normal CDF via the Abramowitz-Stegun erf approximation.
fn norm_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

fn erf(x: f64) -> f64 {
    // Abramowitz & Stegun 7.1.26, max absolute error 1.5e-7.
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal quantile function (Acklam's rational approximation).
fn norm_ppf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -norm_ppf(1.0 - p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_unnormalized_mass() {
        let result = DiscreteDistribution::new(vec![0.5, 0.4], vec![0.5, 1.5]);
        assert!(matches!(result, Err(DistributionError::MassNotOne { .. })));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let result = DiscreteDistribution::new(vec![1.0], vec![0.5, 1.5]);
        assert!(matches!(
            result,
            Err(DistributionError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_probability() {
        let result = DiscreteDistribution::new(vec![1.5, -0.5], vec![0.5, 1.5]);
        assert_eq!(result, Err(DistributionError::InvalidProbability));
    }

    #[test]
    fn test_degenerate() {
        let d = DiscreteDistribution::degenerate(1.0);
        assert_eq!(d.len(), 1);
        assert_relative_eq!(d.mean(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lognormal_mean_one() {
        for &(n, sigma) in &[(7usize, 0.1), (16, 0.2), (5, 0.5)] {
            let d = DiscreteDistribution::lognormal(n, sigma).unwrap();
            assert_eq!(d.len(), n);
            assert_relative_eq!(d.mean(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(d.probs().iter().sum::<f64>(), 1.0, epsilon = 1e-12);
            // Conditional means must increase across the bins.
            assert!(d.values().windows(2).all(|w| w[1] > w[0]));
            assert!(d.values().iter().all(|v| *v > 0.0));
        }
    }

    #[test]
    fn test_lognormal_zero_sigma() {
        let d = DiscreteDistribution::lognormal(7, 0.0).unwrap();
        assert_eq!(d, DiscreteDistribution::degenerate(1.0));
    }

    #[test]
    fn test_outcome_constant_mean_preserves_mean() {
        let base = DiscreteDistribution::lognormal(7, 0.1).unwrap();
        let mixed = base.with_outcome_constant_mean(0.0, 0.05).unwrap();
        assert_eq!(mixed.len(), 8);
        assert_relative_eq!(mixed.mean(), base.mean(), epsilon = 1e-12);
        assert_relative_eq!(mixed.values()[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(mixed.probs()[0], 0.05, epsilon = 1e-12);
        // A zero outcome scales the remaining values by 1 / (1 - p).
        assert_relative_eq!(
            mixed.values()[1],
            base.values()[0] / 0.95,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_norm_helpers_are_consistent() {
        for &p in &[0.05, 0.25, 0.5, 0.75, 0.99] {
            let round_trip = norm_cdf(norm_ppf(p));
            assert!((round_trip - p).abs() < 1e-6, "p = {p}, got {round_trip}");
        }
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-8);
    }
}
