//! Labor lifecycle model CLI
//!
//! Solves the lifecycle for a given parameterization and dumps sampled
//! policy surfaces.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use labor_model::{LifecycleSolver, ModelParams};

#[derive(Parser, Debug)]
#[command(
    name = "labor_model",
    about = "Lifecycle consumption-saving solver with endogenous labor supply"
)]
struct Cli {
    /// JSON parameter file; defaults to the built-in calibration.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Override the number of periods to solve.
    #[arg(long)]
    periods: Option<usize>,

    /// Write sampled policy surfaces to this CSV file.
    #[arg(long, default_value = "policy_output.csv")]
    output: PathBuf,

    /// Number of bank-balance sample points per shock.
    #[arg(long, default_value_t = 50)]
    samples: usize,

    /// Largest bank balance to sample.
    #[arg(long, default_value_t = 20.0)]
    b_max: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut params = match &cli.params {
        Some(path) => ModelParams::from_json_file(path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => ModelParams::default(),
    };
    if let Some(periods) = cli.periods {
        params.periods = periods;
    }

    println!("Labor lifecycle model");
    println!("=====================\n");
    println!("  CRRA: {}", params.crra);
    println!("  Discount factor: {}", params.disc_fac);
    println!("  Risk-free return: {}", params.rfree);
    println!("  Periods: {}", params.periods);
    println!();

    let solver = LifecycleSolver::new(params)?;
    let start = Instant::now();
    let solutions = solver.solve()?;
    println!("Solved {} periods in {:?}\n", solutions.len(), start.elapsed());

    let tran_shk_dstn = solver.params().income.tran_shk_dstn()?;
    let shocks = tran_shk_dstn.values();
    let median_shock = shocks[shocks.len() / 2];

    // First-period policies at the median transitory shock.
    let first = &solutions[0];
    println!(
        "Period 0 policies at transitory shock {:.4}:",
        median_shock
    );
    println!(
        "{:>10} {:>14} {:>10} {:>14}",
        "b", "consumption", "labor", "marg value"
    );
    println!("{}", "-".repeat(52));
    let b_min = first.min_balance(median_shock);
    for k in 0..12 {
        let b = b_min + (cli.b_max - b_min) * k as f64 / 11.0;
        println!(
            "{:>10.4} {:>14.6} {:>10.6} {:>14.6}",
            b,
            first.consumption(b, median_shock),
            first.labor(b, median_shock),
            first.marginal_value(b, median_shock),
        );
    }

    // Full sampled surfaces to CSV.
    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    writer.write_record([
        "period",
        "tran_shk",
        "bank_balance",
        "consumption",
        "labor",
        "marginal_value",
    ])?;
    let samples = cli.samples.max(2);
    for (t, solution) in solutions.iter().enumerate() {
        for &theta in shocks {
            let b_min = solution.min_balance(theta);
            for k in 0..samples {
                let b = b_min + (cli.b_max - b_min) * k as f64 / (samples - 1) as f64;
                writer.write_record([
                    t.to_string(),
                    format!("{theta:.6}"),
                    format!("{b:.6}"),
                    format!("{:.6}", solution.consumption(b, theta)),
                    format!("{:.6}", solution.labor(b, theta)),
                    format!("{:.6}", solution.marginal_value(b, theta)),
                ])?;
            }
        }
    }
    writer.flush()?;
    println!("\nPolicy surfaces written to: {}", cli.output.display());

    Ok(())
}
