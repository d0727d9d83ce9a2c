//! Projection request: the engine's only input

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Months per year in the reference (monthly contribution) domain
pub const MONTHS_PER_YEAR: i64 = 12;

/// A recurring contribution projected over a number of periods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// Amount added at the start of every period
    pub periodic_contribution: f64,

    /// Number of periods to project (months in the reference domain)
    pub horizon_periods: i64,
}

impl ProjectionRequest {
    pub fn new(periodic_contribution: f64, horizon_periods: i64) -> Self {
        Self {
            periodic_contribution,
            horizon_periods,
        }
    }

    /// Monthly contribution over a horizon given in years
    pub fn from_years(monthly_contribution: f64, years: i64) -> Self {
        Self::new(monthly_contribution, years.saturating_mul(MONTHS_PER_YEAR))
    }

    /// Check the caller contract; nothing is clamped
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.horizon_periods < 1 {
            return Err(ProjectionError::InvalidHorizon(self.horizon_periods));
        }
        if !self.periodic_contribution.is_finite() || self.periodic_contribution < 0.0 {
            return Err(ProjectionError::InvalidContribution(self.periodic_contribution));
        }
        Ok(())
    }
}
