//! Scalar CRRA utility kernels
//!
//! All solver math funnels through these closed forms: utility, marginal
//! utility, and the inverse of marginal utility for an agent with constant
//! relative risk aversion `rho`.

/// CRRA utility: u(x) = x^(1-rho) / (1-rho), with the log-utility limit at
/// rho = 1.
pub fn utility(x: f64, rho: f64) -> f64 {
    if (rho - 1.0).abs() < 1e-12 {
        x.ln()
    } else {
        x.powf(1.0 - rho) / (1.0 - rho)
    }
}

/// CRRA marginal utility: u'(x) = x^(-rho).
pub fn marginal_utility(x: f64, rho: f64) -> f64 {
    x.powf(-rho)
}

/// Inverse of CRRA marginal utility: (u')^(-1)(m) = m^(-1/rho).
pub fn marginal_utility_inv(m: f64, rho: f64) -> f64 {
    m.powf(-1.0 / rho)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_marginal_utility_round_trip() {
        for &x in &[0.1, 0.5, 1.0, 2.5, 10.0] {
            for &rho in &[1.5, 2.0, 4.0] {
                let m = marginal_utility(x, rho);
                assert_relative_eq!(marginal_utility_inv(m, rho), x, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_marginal_utility_decreasing() {
        let rho = 2.0;
        assert!(marginal_utility(0.5, rho) > marginal_utility(1.0, rho));
        assert!(marginal_utility(1.0, rho) > marginal_utility(2.0, rho));
    }

    #[test]
    fn test_log_utility_limit() {
        assert_relative_eq!(utility(2.0, 1.0), 2.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_utility_negative_above_unit_rho() {
        // With rho > 1 utility is negative and increasing toward zero.
        let u1 = utility(1.0, 2.0);
        let u2 = utility(2.0, 2.0);
        assert!(u1 < u2);
        assert!(u2 < 0.0);
    }
}
