//! CSV-based scenario loader
//!
//! Reads scenario definitions from a file with the header
//! `Name,AnnualDrift,AnnualVolatility`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use super::Scenario;
use crate::error::ConfigError;

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "AnnualDrift")]
    annual_drift: f64,
    #[serde(rename = "AnnualVolatility")]
    annual_volatility: f64,
}

impl CsvRow {
    fn into_scenario(self) -> Scenario {
        Scenario::new(self.name.trim(), self.annual_drift, self.annual_volatility)
    }
}

/// Load scenarios from a CSV file, preserving file order
pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>, ConfigError> {
    let file = File::open(path)?;
    let scenarios = load_scenarios_from_reader(file)?;
    debug!("loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from any reader (useful for tests and embedded data)
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>, ConfigError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut scenarios = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario());
    }

    Ok(scenarios)
}
