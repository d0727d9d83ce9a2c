//! Error types for catalog construction and projection requests

use thiserror::Error;

/// Errors surfaced to the caller of a projection
///
/// Only request validation and cancellation can fail; the simulation itself
/// is infallible for a valid request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Horizon must cover at least one period
    #[error("invalid horizon: {0} periods (must be at least 1)")]
    InvalidHorizon(i64),

    /// Contribution must be a finite, non-negative amount
    #[error("invalid periodic contribution: {0} (must be finite and non-negative)")]
    InvalidContribution(f64),

    /// Caller requested cancellation before all scenarios completed
    #[error("projection cancelled")]
    Cancelled,
}

/// Errors raised while building a scenario catalog or engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scenario name must not be empty")]
    EmptyScenarioName,

    #[error("duplicate scenario name: {0}")]
    DuplicateScenario(String),

    #[error("scenario {name}: annual drift must be finite, got {value}")]
    InvalidDrift { name: String, value: f64 },

    #[error("scenario {name}: annual volatility must be finite and non-negative, got {value}")]
    InvalidVolatility { name: String, value: f64 },

    #[error("trial count must be at least 1")]
    ZeroTrialCount,

    #[error("periods per year must be at least 1")]
    ZeroPeriodsPerYear,

    #[error("invalid value for {key}: {value}")]
    InvalidEnvValue { key: &'static str, value: String },

    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario file: {0}")]
    Csv(#[from] csv::Error),
}
