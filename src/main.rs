//! Wealth Projection CLI
//!
//! Projects a monthly contribution under every catalog scenario and prints
//! the p10 / median / p90 terminal values.
//!
//! Engine defaults can be overridden via environment variables
//! (PROJECTION_TRIALS, PROJECTION_SEED, PERIODS_PER_YEAR, PROJECTION_PARALLEL);
//! command-line flags take precedence.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;

use wealth_projection::{
    EngineConfig, ProjectionEngine, ProjectionRequest, ProjectionResult, ScenarioCatalog,
};

#[derive(Debug, Parser)]
#[command(name = "wealth_projection", version, about = "Monte Carlo projection of a recurring investment")]
struct Cli {
    /// Contribution added at the start of every period
    #[arg(long, alias = "monthly-investment")]
    monthly: f64,

    /// Horizon in years (converted to 12 periods per year)
    #[arg(long, conflicts_with = "periods", required_unless_present = "periods")]
    years: Option<i64>,

    /// Horizon in periods
    #[arg(long)]
    periods: Option<i64>,

    /// Trials per scenario
    #[arg(long)]
    trials: Option<usize>,

    /// Base seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Periods per year used to de-scale annual drift and volatility
    #[arg(long)]
    periods_per_year: Option<u32>,

    /// Scenario catalog CSV (Name,AnnualDrift,AnnualVolatility)
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Run everything on the calling thread
    #[arg(long)]
    sequential: bool,

    /// Print a JSON report instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ProjectionReport<'a> {
    generated_at: DateTime<Utc>,
    periodic_contribution: f64,
    horizon_periods: i64,
    trial_count: usize,
    seed: Option<u64>,
    scenarios: &'a ProjectionResult,
    execution_time_ms: u64,
}

impl Cli {
    fn request(&self) -> ProjectionRequest {
        match (self.periods, self.years) {
            (Some(periods), _) => ProjectionRequest::new(self.monthly, periods),
            (None, Some(years)) => ProjectionRequest::from_years(self.monthly, years),
            (None, None) => ProjectionRequest::new(self.monthly, 0),
        }
    }

    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = EngineConfig::from_env().context("invalid engine configuration in environment")?;
        if let Some(trials) = self.trials {
            config.trial_count = trials;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(periods_per_year) = self.periods_per_year {
            config.periods_per_year = periods_per_year;
        }
        if self.sequential {
            config.parallel = false;
        }
        Ok(config)
    }

    fn catalog(&self) -> Result<ScenarioCatalog> {
        match &self.scenarios {
            Some(path) => ScenarioCatalog::from_csv_path(path)
                .with_context(|| format!("failed to load scenarios from {}", path.display())),
            None => Ok(ScenarioCatalog::default()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let start = Instant::now();

    let config = cli.engine_config()?;
    let engine = ProjectionEngine::new(cli.catalog()?, config).context("invalid engine configuration")?;
    let request = cli.request();

    let result = engine.project(&request)?;
    let elapsed = start.elapsed();

    if cli.json {
        let report = ProjectionReport {
            generated_at: Utc::now(),
            periodic_contribution: request.periodic_contribution,
            horizon_periods: request.horizon_periods,
            trial_count: engine.config().trial_count,
            seed: engine.config().seed,
            scenarios: &result,
            execution_time_ms: elapsed.as_millis() as u64,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let invested = request.periodic_contribution * request.horizon_periods as f64;

    println!("Wealth Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("  Contribution per period: {:.2}", request.periodic_contribution);
    println!("  Periods:                 {}", request.horizon_periods);
    println!("  Total invested:          {:.2}", invested);
    println!("  Trials per scenario:     {}", engine.config().trial_count);
    println!();

    println!("{:<16} {:>16} {:>16} {:>16}", "Scenario", "P10", "Median", "P90");
    println!("{}", "-".repeat(67));
    for (name, summary) in result.iter() {
        println!(
            "{:<16} {:>16} {:>16} {:>16}",
            name, summary.p10, summary.median, summary.p90
        );
    }

    println!("\nCompleted in {:?}", elapsed);
    Ok(())
}
