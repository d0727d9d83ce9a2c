//! Projection engine: every catalog scenario for one request

use std::env;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;

use crate::error::{ConfigError, ProjectionError};
use crate::scenario::{Scenario, ScenarioCatalog};
use super::aggregator::{ScenarioAggregator, DEFAULT_TRIAL_COUNT};
use super::random::{entropy_seed, scenario_seed, NormalSourceFactory, SeededNormals};
use super::request::ProjectionRequest;
use super::results::{ProjectionResult, ScenarioSummary};
use super::trial::{TrialSimulator, DEFAULT_PERIODS_PER_YEAR};

/// Configuration for a projection engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Independent trials per scenario
    pub trial_count: usize,

    /// Annual-to-period conversion (12 for monthly horizons)
    pub periods_per_year: u32,

    /// Base seed for reproducible runs; fresh entropy per projection if None
    pub seed: Option<u64>,

    /// Compute scenarios and trials on the rayon pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_TRIAL_COUNT,
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
            seed: None,
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trial_count == 0 {
            return Err(ConfigError::ZeroTrialCount);
        }
        if self.periods_per_year == 0 {
            return Err(ConfigError::ZeroPeriodsPerYear);
        }
        Ok(())
    }

    /// Defaults overridden by environment variables:
    ///   PROJECTION_TRIALS, PROJECTION_SEED, PERIODS_PER_YEAR, PROJECTION_PARALLEL
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, tests)
    pub fn with_overrides<L>(mut self, lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&'static str) -> Option<String>,
    {
        if let Some(trials) = parse_var(&lookup, "PROJECTION_TRIALS")? {
            self.trial_count = trials;
        }
        if let Some(seed) = parse_var(&lookup, "PROJECTION_SEED")? {
            self.seed = Some(seed);
        }
        if let Some(periods) = parse_var(&lookup, "PERIODS_PER_YEAR")? {
            self.periods_per_year = periods;
        }
        if let Some(raw) = lookup("PROJECTION_PARALLEL") {
            self.parallel = match raw.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidEnvValue {
                        key: "PROJECTION_PARALLEL",
                        value: raw,
                    })
                }
            };
        }

        self.validate()?;
        Ok(self)
    }
}

fn parse_var<T, L>(lookup: &L, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    L: Fn(&'static str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvValue { key, value: raw }),
    }
}

/// Shared progress and cancellation for a running projection
#[derive(Debug, Clone, Default)]
pub struct ProjectionProgress {
    completed: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl ProjectionProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scenarios finished so far
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Stop before the next scenario starts; a running scenario finishes
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine<F = SeededNormals> {
    catalog: ScenarioCatalog,
    config: EngineConfig,
    aggregator: ScenarioAggregator<F>,
}

impl ProjectionEngine<SeededNormals> {
    /// Engine drawing from one `SmallRng` per trial
    pub fn new(catalog: ScenarioCatalog, config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_sources(catalog, config, SeededNormals)
    }
}

impl Default for ProjectionEngine<SeededNormals> {
    fn default() -> Self {
        Self::assemble(ScenarioCatalog::default(), EngineConfig::default(), SeededNormals)
    }
}

impl<F: NormalSourceFactory> ProjectionEngine<F> {
    /// Engine with a caller-supplied random source factory
    pub fn with_sources(
        catalog: ScenarioCatalog,
        config: EngineConfig,
        sources: F,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(catalog, config, sources))
    }

    /// Build from an already validated config
    fn assemble(catalog: ScenarioCatalog, config: EngineConfig, sources: F) -> Self {
        let simulator = TrialSimulator::new(config.periods_per_year);
        let aggregator = ScenarioAggregator::with_sources(simulator, config.trial_count, sources)
            .parallel(config.parallel);

        Self {
            catalog,
            config,
            aggregator,
        }
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Project the request under every catalog scenario
    pub fn project(&self, request: &ProjectionRequest) -> Result<ProjectionResult, ProjectionError> {
        self.project_with_progress(request, &ProjectionProgress::new())
    }

    /// Like [`project`](Self::project), checking for cancellation between scenarios
    pub fn project_with_progress(
        &self,
        request: &ProjectionRequest,
        progress: &ProjectionProgress,
    ) -> Result<ProjectionResult, ProjectionError> {
        request.validate()?;

        let base_seed = self.config.seed.unwrap_or_else(entropy_seed);
        info!(
            "projecting contribution {} over {} periods: {} scenarios x {} trials",
            request.periodic_contribution,
            request.horizon_periods,
            self.catalog.len(),
            self.config.trial_count
        );
        debug!("base seed {}", base_seed);

        let run = |scenario: &Scenario| {
            if progress.is_cancelled() {
                return Err(ProjectionError::Cancelled);
            }
            let summary = self.summarize(scenario, request, base_seed);
            progress.increment();
            Ok((scenario.name.clone(), summary))
        };

        let entries: Vec<(String, ScenarioSummary)> = if self.config.parallel {
            self.catalog.as_slice().par_iter().map(run).collect::<Result<_, _>>()?
        } else {
            self.catalog.iter().map(run).collect::<Result<_, _>>()?
        };

        Ok(entries.into_iter().collect())
    }

    /// Summary for a single scenario under this engine's seed policy
    pub fn summarize(
        &self,
        scenario: &Scenario,
        request: &ProjectionRequest,
        base_seed: u64,
    ) -> ScenarioSummary {
        self.aggregator
            .summarize(scenario, request, scenario_seed(base_seed, &scenario.name))
    }
}
