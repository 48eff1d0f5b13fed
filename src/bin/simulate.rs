//! Simulate a block of physiotherapy practices and export the results
//!
//! Writes the practice dataset, the four revenue summaries and the
//! regression design matrix as CSV files.

use anyhow::{Context, Result};
use clap::Parser;
use physio_revenue_sim::export::{self, DesignMatrix};
use physio_revenue_sim::{ReferenceTables, RevenueSummary, SimulationEngine, SimulationParams};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Monte-Carlo revenue simulation for Swiss physiotherapy practices")]
struct Cli {
    /// JSON parameter file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of practices to simulate
    #[arg(long)]
    n_practices: Option<usize>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Working days per month
    #[arg(long)]
    working_days: Option<u32>,

    /// CHF per tariff point
    #[arg(long)]
    point_rate: Option<f64>,

    /// Directory for the CSV output
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();

    let mut params = match &cli.config {
        Some(path) => SimulationParams::from_json_file(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
        None => SimulationParams::default(),
    };
    if let Some(n) = cli.n_practices {
        params.n_practices = n;
    }
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    if let Some(days) = cli.working_days {
        params.working_days_per_month = days;
    }
    if let Some(rate) = cli.point_rate {
        params.point_to_chf_rate = rate;
    }

    let tables = ReferenceTables::swiss_physio().context("Invalid reference tables")?;
    let engine = SimulationEngine::new(&tables, params).context("Invalid simulation parameters")?;

    println!(
        "Simulating {} practices (seed {}, {} working days/month, {} CHF/point)...",
        engine.params().n_practices,
        engine.params().seed,
        engine.params().working_days_per_month,
        engine.params().point_to_chf_rate,
    );
    let practices = engine.run_seeded().context("Simulation failed")?;
    let summary = RevenueSummary::build(&practices, &tables);

    let written = export::write_all(&cli.output_dir, &practices, &summary)
        .context("Failed to write summary tables")?;
    let design = DesignMatrix::build(&practices, &tables);
    let design_path = design
        .write_to_dir(&cli.output_dir)
        .with_context(|| {
            let path = cli.output_dir.join(export::DESIGN_MATRIX_FILE);
            format!("Failed to write design matrix to {}", path.display())
        })?;

    for path in written.iter().chain(std::iter::once(&design_path)) {
        println!("Output written to {}", path.display());
    }

    // Print summary stats
    let overall = &summary.overall;
    println!("\nTotal annual revenue (CHF):");
    println!("  Practices: {}", overall.count);
    println!("  Mean:      {:.0}", overall.mean.unwrap_or(0.0));
    println!("  Median:    {:.0}", overall.median.unwrap_or(0.0));
    println!("  Std dev:   {:.0}", overall.std_dev.unwrap_or(0.0));
    println!("  Range:     [{:.0}, {:.0}]", overall.min.unwrap_or(0.0), overall.max.unwrap_or(0.0));

    println!("\nBy physiotherapist count:");
    println!("{:>6} {:>6} {:>12} {:>12}", "Physio", "Count", "Mean", "Median");
    for row in &summary.by_physio {
        println!(
            "{:>6} {:>6} {:>12.0} {:>12.0}",
            row.n_physio,
            row.count,
            row.mean.unwrap_or(0.0),
            row.median.unwrap_or(0.0),
        );
    }

    println!("\nBy treatment (baseline {}):", design.baseline_treatment);
    for row in &summary.by_treatment {
        println!(
            "  {} {:<32} n={:<4} mean={:.0}",
            row.treatment_code,
            row.treatment_name,
            row.count,
            row.mean.unwrap_or(0.0),
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
