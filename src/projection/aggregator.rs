//! Scenario aggregation: many independent trials reduced to percentiles

use log::debug;
use rayon::prelude::*;

use crate::scenario::Scenario;
use super::percentile::{median_sorted, percentile_sorted, sort_values, truncate};
use super::random::{trial_seeds, NormalSourceFactory, SeededNormals};
use super::request::ProjectionRequest;
use super::results::ScenarioSummary;
use super::trial::TrialSimulator;

/// Trials per scenario used by the service
pub const DEFAULT_TRIAL_COUNT: usize = 100;

const P10: f64 = 10.0;
const P90: f64 = 90.0;

/// Runs a fixed number of trials per scenario and summarizes them
#[derive(Debug, Clone)]
pub struct ScenarioAggregator<F = SeededNormals> {
    simulator: TrialSimulator,
    trial_count: usize,
    parallel: bool,
    sources: F,
}

impl ScenarioAggregator<SeededNormals> {
    /// Monthly simulator with one `SmallRng` per trial
    pub fn new(trial_count: usize) -> Self {
        Self::with_sources(TrialSimulator::default(), trial_count, SeededNormals)
    }
}

impl<F: NormalSourceFactory> ScenarioAggregator<F> {
    pub fn with_sources(simulator: TrialSimulator, trial_count: usize, sources: F) -> Self {
        debug_assert!(trial_count > 0, "trial_count must be positive");
        Self {
            simulator,
            trial_count,
            parallel: false,
            sources,
        }
    }

    /// Run trials on the rayon pool instead of the calling thread
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    pub fn simulator(&self) -> &TrialSimulator {
        &self.simulator
    }

    /// Terminal values of every trial, in trial order
    ///
    /// Trial seeds are drawn from `scenario_seed` before any trial runs, so
    /// the values are the same whether trials run in parallel or not.
    pub fn terminal_values(
        &self,
        scenario: &Scenario,
        request: &ProjectionRequest,
        scenario_seed: u64,
    ) -> Vec<f64> {
        let seeds = trial_seeds(scenario_seed, self.trial_count);

        if self.parallel {
            seeds
                .par_iter()
                .map(|&seed| self.run_one(scenario, request, seed))
                .collect()
        } else {
            seeds
                .iter()
                .map(|&seed| self.run_one(scenario, request, seed))
                .collect()
        }
    }

    /// p10 / median / p90 of the scenario's terminal values
    pub fn summarize(
        &self,
        scenario: &Scenario,
        request: &ProjectionRequest,
        scenario_seed: u64,
    ) -> ScenarioSummary {
        let mut values = self.terminal_values(scenario, request, scenario_seed);
        let summary = summarize_terminal_values(&mut values);

        debug!(
            "{}: {} trials x {} periods -> p10={} median={} p90={}",
            scenario.name,
            self.trial_count,
            request.horizon_periods,
            summary.p10,
            summary.median,
            summary.p90
        );

        summary
    }

    fn run_one(&self, scenario: &Scenario, request: &ProjectionRequest, seed: u64) -> f64 {
        let mut source = self.sources.source_for(seed);
        self.simulator.run_trial(scenario, request, &mut source)
    }
}

/// Reduce terminal values to truncated percentiles (sorts `values` in place)
pub fn summarize_terminal_values(values: &mut [f64]) -> ScenarioSummary {
    sort_values(values);
    let sorted: &[f64] = values;

    let at = |pct| truncate(percentile_sorted(sorted, pct).unwrap_or(0.0));
    ScenarioSummary {
        p10: at(P10),
        median: truncate(median_sorted(sorted).unwrap_or(0.0)),
        p90: at(P90),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::random::NoiseFree;

    #[test]
    fn test_summary_ordering() {
        let aggregator = ScenarioAggregator::new(DEFAULT_TRIAL_COUNT);
        let request = ProjectionRequest::from_years(1000.0, 10);

        for scenario in [Scenario::conservative(), Scenario::balanced(), Scenario::aggressive()] {
            let summary = aggregator.summarize(&scenario, &request, 17);
            assert!(summary.p10 <= summary.median, "{}: {:?}", scenario.name, summary);
            assert!(summary.median <= summary.p90, "{}: {:?}", scenario.name, summary);
        }
    }

    #[test]
    fn test_single_trial_collapses_percentiles() {
        let aggregator = ScenarioAggregator::new(1);
        let request = ProjectionRequest::new(250.0, 36);

        let values = aggregator.terminal_values(&Scenario::aggressive(), &request, 5);
        let summary = aggregator.summarize(&Scenario::aggressive(), &request, 5);

        let expected = truncate(values[0]);
        assert_eq!(summary, ScenarioSummary { p10: expected, median: expected, p90: expected });
    }

    #[test]
    fn test_zero_contribution_is_all_zero() {
        let aggregator = ScenarioAggregator::new(25);
        let request = ProjectionRequest::new(0.0, 120);

        let summary = aggregator.summarize(&Scenario::aggressive(), &request, 3);
        assert_eq!(summary, ScenarioSummary::ZERO);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let request = ProjectionRequest::from_years(2000.0, 5);
        let sequential = ScenarioAggregator::new(64);
        let parallel = ScenarioAggregator::new(64).parallel(true);

        assert_eq!(
            sequential.terminal_values(&Scenario::balanced(), &request, 11),
            parallel.terminal_values(&Scenario::balanced(), &request, 11)
        );
    }

    #[test]
    fn test_trials_are_not_correlated() {
        let aggregator = ScenarioAggregator::new(10);
        let request = ProjectionRequest::new(100.0, 24);

        let mut values = aggregator.terminal_values(&Scenario::aggressive(), &request, 8);
        sort_values(&mut values);
        values.dedup();
        assert_eq!(values.len(), 10);
    }

    #[test]
    fn test_noise_free_trials_are_identical() {
        let aggregator =
            ScenarioAggregator::with_sources(TrialSimulator::default(), 3, NoiseFree);
        let request = ProjectionRequest::new(1000.0, 12);

        let values = aggregator.terminal_values(&Scenario::balanced(), &request, 0);
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| *v == values[0]));

        let summary = aggregator.summarize(&Scenario::balanced(), &request, 0);
        assert_eq!(summary.p10, summary.p90);
    }

    #[test]
    fn test_summarize_terminal_values_interpolates() {
        let mut values: Vec<f64> = (1..=11).rev().map(|v| v as f64 * 100.5).collect();
        let summary = summarize_terminal_values(&mut values);

        // rank 1, 5, 9 on 0..=10 land exactly on order statistics
        assert_eq!(summary, ScenarioSummary { p10: 201, median: 603, p90: 1005 });
    }

    #[test]
    fn test_overflowed_trials_keep_summary_ordered() {
        let mut values: Vec<f64> = std::iter::repeat(1e6)
            .take(40)
            .chain(std::iter::repeat(f64::INFINITY).take(60))
            .collect();
        let summary = summarize_terminal_values(&mut values);
        assert_eq!(
            summary,
            ScenarioSummary { p10: 1_000_000, median: i64::MAX, p90: i64::MAX }
        );

        // p90 rank 8.1 sits between the last finite value and the overflow
        let mut values = vec![1.0; 9];
        values.push(f64::INFINITY);
        let summary = summarize_terminal_values(&mut values);
        assert_eq!(summary, ScenarioSummary { p10: 1, median: 1, p90: i64::MAX });
    }
}
