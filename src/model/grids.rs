//! Grid construction for end-of-period assets

use serde::Deserialize;

/// Evenly spaced grid between `lo` and `hi` inclusive.
fn linspace(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (count - 1) as f64;
    (0..count).map(|i| lo + step * i as f64).collect()
}

/// Exponentially nested grid between `min` and `max`.
///
/// Each nesting level takes log(1 + x) of the bounds before spacing evenly,
/// concentrating nodes near the bottom of the range where policy functions
/// curve the most. `nest = 0` gives an evenly spaced grid.
pub fn exp_mult_grid(min: f64, max: f64, count: usize, nest: u32) -> Vec<f64> {
    let mut lo = min;
    let mut hi = max;
    for _ in 0..nest {
        lo = lo.ln_1p();
        hi = hi.ln_1p();
    }
    let mut grid = linspace(lo, hi, count);
    for _ in 0..nest {
        for g in grid.iter_mut() {
            *g = g.exp_m1();
        }
    }
    grid
}

/// Settings for the "extra" end-of-period asset grid.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct AssetGridConfig {
    /// Smallest positive asset node.
    pub min: f64,
    /// Largest asset node.
    pub max: f64,
    /// Number of nodes.
    pub count: usize,
    /// Exponential nesting depth.
    pub nest: u32,
}

impl Default for AssetGridConfig {
    fn default() -> Self {
        Self {
            min: 0.001,
            max: 80.0,
            count: 200,
            nest: 3,
        }
    }
}

impl AssetGridConfig {
    pub fn build(&self) -> Vec<f64> {
        exp_mult_grid(self.min, self.max, self.count, self.nest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exp_mult_grid_bounds_and_monotone() {
        let grid = exp_mult_grid(0.001, 20.0, 48, 3);
        assert_eq!(grid.len(), 48);
        assert_relative_eq!(grid[0], 0.001, epsilon = 1e-9);
        assert_relative_eq!(grid[47], 20.0, epsilon = 1e-9);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_nesting_concentrates_low_nodes() {
        let nested = exp_mult_grid(0.01, 10.0, 10, 3);
        let even = exp_mult_grid(0.01, 10.0, 10, 0);
        // More nodes below the midpoint with nesting than without.
        let below = |g: &[f64]| g.iter().filter(|v| **v < 5.0).count();
        assert!(below(&nested) > below(&even));
    }

    #[test]
    fn test_no_nesting_is_even_spacing() {
        let grid = exp_mult_grid(0.0, 1.0, 5, 0);
        assert_relative_eq!(grid[1] - grid[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(grid[3] - grid[2], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_default_config_builds_valid_grid() {
        let grid = AssetGridConfig::default().build();
        assert_eq!(grid.len(), 200);
        assert!(grid[0] > 0.0);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
    }
}
