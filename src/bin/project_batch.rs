//! Run projections for a batch of requests from CSV
//!
//! Input columns:  RequestID,MonthlyInvestment,Years
//! Output columns: RequestID,Scenario,P10,Median,P90

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use wealth_projection::{
    EngineConfig, ProjectionEngine, ProjectionError, ProjectionRequest, ProjectionResult,
    ScenarioCatalog,
};

#[derive(Debug, Parser)]
#[command(name = "project_batch", about = "Project every request in a CSV file")]
struct Args {
    /// Input CSV of requests
    input: PathBuf,

    /// Output CSV of scenario summaries
    #[arg(long, default_value = "batch_projection_output.csv")]
    output: PathBuf,

    /// Trials per scenario
    #[arg(long)]
    trials: Option<usize>,

    /// Base seed shared by every request
    #[arg(long)]
    seed: Option<u64>,

    /// Scenario catalog CSV
    #[arg(long)]
    scenarios: Option<PathBuf>,
}

/// Raw CSV row matching the batch input columns
#[derive(Debug, Deserialize)]
struct RequestRow {
    #[serde(rename = "RequestID")]
    request_id: String,
    #[serde(rename = "MonthlyInvestment")]
    monthly_investment: f64,
    #[serde(rename = "Years")]
    years: i64,
}

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "RequestID")]
    request_id: &'a str,
    #[serde(rename = "Scenario")]
    scenario: &'a str,
    #[serde(rename = "P10")]
    p10: i64,
    #[serde(rename = "Median")]
    median: i64,
    #[serde(rename = "P90")]
    p90: i64,
}

fn load_requests(path: &Path) -> Result<Vec<RequestRow>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.context("malformed request row")?);
    }
    Ok(rows)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let mut config = EngineConfig::from_env()?;
    if let Some(trials) = args.trials {
        config.trial_count = trials;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    // Requests are spread across the pool; each one runs single-threaded
    config.parallel = false;

    let catalog = match &args.scenarios {
        Some(path) => ScenarioCatalog::from_csv_path(path)?,
        None => ScenarioCatalog::default(),
    };
    let engine = ProjectionEngine::new(catalog, config)?;

    let requests = load_requests(&args.input)?;
    info!("loaded {} requests from {}", requests.len(), args.input.display());

    let results: Vec<(&RequestRow, Result<ProjectionResult, ProjectionError>)> = requests
        .par_iter()
        .map(|row| {
            let request = ProjectionRequest::from_years(row.monthly_investment, row.years);
            (row, engine.project(&request))
        })
        .collect();

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let mut skipped = 0;
    for (row, result) in &results {
        match result {
            Ok(projection) => {
                for (scenario, summary) in projection.iter() {
                    writer.serialize(SummaryRow {
                        request_id: &row.request_id,
                        scenario,
                        p10: summary.p10,
                        median: summary.median,
                        p90: summary.p90,
                    })?;
                }
            }
            Err(e) => {
                warn!("skipping request {}: {}", row.request_id, e);
                skipped += 1;
            }
        }
    }
    writer.flush()?;

    println!(
        "Projected {} of {} requests in {:?}; output written to {}",
        results.len() - skipped,
        results.len(),
        start.elapsed(),
        args.output.display()
    );

    Ok(())
}
