//! Scenario catalog: named annualized return profiles
//!
//! The catalog is fixed at process start. Changing the set of scenarios is a
//! configuration change (see [`loader`]), never a per-request operation.

pub mod loader;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named market behavior with annualized drift and volatility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique identifier within a catalog
    pub name: String,

    /// Expected yearly return (0.12 = 12%)
    pub annual_drift: f64,

    /// Standard deviation of the yearly return
    pub annual_volatility: f64,
}

impl Scenario {
    pub fn new(name: impl Into<String>, annual_drift: f64, annual_volatility: f64) -> Self {
        Self {
            name: name.into(),
            annual_drift,
            annual_volatility,
        }
    }

    /// FD-like profile: low return, almost no noise
    pub fn conservative() -> Self {
        Self::new("Conservative", 0.07, 0.02)
    }

    /// Broad index profile
    pub fn balanced() -> Self {
        Self::new("Balanced", 0.12, 0.15)
    }

    /// Small cap / high volatility mix
    pub fn aggressive() -> Self {
        Self::new("Aggressive", 0.18, 0.25)
    }

    /// Same scenario with the noise term removed
    pub fn noise_free(&self) -> Self {
        Self {
            annual_volatility: 0.0,
            ..self.clone()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyScenarioName);
        }
        if !self.annual_drift.is_finite() {
            return Err(ConfigError::InvalidDrift {
                name: self.name.clone(),
                value: self.annual_drift,
            });
        }
        if !self.annual_volatility.is_finite() || self.annual_volatility < 0.0 {
            return Err(ConfigError::InvalidVolatility {
                name: self.name.clone(),
                value: self.annual_volatility,
            });
        }
        Ok(())
    }
}

/// Ordered, read-only set of scenarios with unique names
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// Build a catalog, rejecting duplicate names and invalid parameters
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(scenarios.len());
        for scenario in &scenarios {
            scenario.validate()?;
            if !seen.insert(scenario.name.as_str()) {
                return Err(ConfigError::DuplicateScenario(scenario.name.clone()));
            }
        }
        Ok(Self { scenarios })
    }

    /// Load a catalog from a CSV file (`Name,AnnualDrift,AnnualVolatility`)
    pub fn from_csv_path(path: &Path) -> Result<Self, ConfigError> {
        Self::new(loader::load_scenarios(path)?)
    }

    /// Copy of this catalog with the named scenario removed
    pub fn without(&self, name: &str) -> Self {
        Self {
            scenarios: self
                .scenarios
                .iter()
                .filter(|s| s.name != name)
                .cloned()
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }

    pub fn as_slice(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self {
            scenarios: vec![
                Scenario::conservative(),
                Scenario::balanced(),
                Scenario::aggressive(),
            ],
        }
    }
}

impl<'a> IntoIterator for &'a ScenarioCatalog {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let catalog = ScenarioCatalog::default();
        let names: Vec<_> = catalog.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Conservative", "Balanced", "Aggressive"]);

        let balanced = catalog.get("Balanced").unwrap();
        assert_eq!(balanced.annual_drift, 0.12);
        assert_eq!(balanced.annual_volatility, 0.15);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ScenarioCatalog::new(vec![Scenario::balanced(), Scenario::balanced()]);
        assert!(matches!(result, Err(ConfigError::DuplicateScenario(name)) if name == "Balanced"));
    }

    #[test]
    fn test_negative_volatility_rejected() {
        let result = ScenarioCatalog::new(vec![Scenario::new("Broken", 0.05, -0.1)]);
        assert!(matches!(result, Err(ConfigError::InvalidVolatility { .. })));
    }

    #[test]
    fn test_non_finite_drift_rejected() {
        let result = ScenarioCatalog::new(vec![Scenario::new("Broken", f64::NAN, 0.1)]);
        assert!(matches!(result, Err(ConfigError::InvalidDrift { .. })));
    }

    #[test]
    fn test_without_keeps_order() {
        let catalog = ScenarioCatalog::default().without("Balanced");
        let names: Vec<_> = catalog.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Conservative", "Aggressive"]);
    }
}
