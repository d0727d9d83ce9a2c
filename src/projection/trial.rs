//! Single-trial simulation: one random path of periodic compounding

use crate::scenario::Scenario;
use super::random::NormalSource;
use super::request::ProjectionRequest;

/// Default annual-to-period conversion (monthly contributions)
pub const DEFAULT_PERIODS_PER_YEAR: u32 = 12;

/// Runs one path of contribute-then-grow compounding
#[derive(Debug, Clone, Copy)]
pub struct TrialSimulator {
    periods_per_year: u32,
}

impl TrialSimulator {
    /// `periods_per_year` de-scales annual drift (÷P) and volatility (÷√P)
    pub fn new(periods_per_year: u32) -> Self {
        debug_assert!(periods_per_year > 0, "periods_per_year must be positive");
        Self { periods_per_year }
    }

    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// Expected return for one period
    pub fn period_drift(&self, scenario: &Scenario) -> f64 {
        scenario.annual_drift / self.periods_per_year as f64
    }

    /// Standard deviation of the return for one period
    pub fn period_volatility(&self, scenario: &Scenario) -> f64 {
        scenario.annual_volatility / (self.periods_per_year as f64).sqrt()
    }

    /// Terminal value of one trial
    ///
    /// Each period the contribution is added first and then the whole pool,
    /// including the new contribution, grows at that period's random rate.
    /// One normal variate is consumed per period.
    pub fn run_trial<S: NormalSource + ?Sized>(
        &self,
        scenario: &Scenario,
        request: &ProjectionRequest,
        source: &mut S,
    ) -> f64 {
        debug_assert!(request.horizon_periods >= 0, "negative horizon");

        let drift = self.period_drift(scenario);
        let volatility = self.period_volatility(scenario);
        let contribution = request.periodic_contribution;

        let mut total = 0.0;
        for _period in 0..request.horizon_periods.max(0) {
            let z = source.standard_normal();
            let period_rate = drift + z * volatility;
            total = (total + contribution) * (1.0 + period_rate);
        }

        total
    }
}

impl Default for TrialSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_PERIODS_PER_YEAR)
    }
}
