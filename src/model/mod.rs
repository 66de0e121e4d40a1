//! Model inputs: parameters, shock distributions, and grids

mod grids;
mod params;
mod shocks;

pub use grids::{exp_mult_grid, AssetGridConfig};
pub use params::{IncomeProcessConfig, InterpKind, ModelParams};
pub use shocks::{DiscreteDistribution, DistributionError};
