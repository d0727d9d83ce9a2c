//! Wealth Projection - Monte Carlo engine for recurring periodic investments
//!
//! This library provides:
//! - A scenario catalog of annualized (drift, volatility) return profiles
//! - Per-trial simulation of contribute-then-grow compounding
//! - Percentile summaries (p10 / median / p90) over many independent trials
//! - A projection engine that runs every scenario, optionally in parallel
//!
//! ```ignore
//! let engine = ProjectionEngine::default();
//! let result = engine.project(&ProjectionRequest::from_years(5000.0, 10))?;
//! let balanced = result.get("Balanced");
//! ```

pub mod error;
pub mod scenario;
pub mod projection;

// Re-export commonly used types
pub use error::{ConfigError, ProjectionError};
pub use scenario::{Scenario, ScenarioCatalog};
pub use projection::{
    EngineConfig, ProjectionEngine, ProjectionProgress, ProjectionRequest, ProjectionResult,
    ScenarioSummary,
};
