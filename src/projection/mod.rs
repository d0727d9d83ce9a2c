//! Monte Carlo projection of recurring contributions

pub mod random;
mod request;
mod trial;
pub mod percentile;
mod aggregator;
mod results;
mod engine;

pub use request::{ProjectionRequest, MONTHS_PER_YEAR};
pub use trial::{TrialSimulator, DEFAULT_PERIODS_PER_YEAR};
pub use aggregator::{ScenarioAggregator, summarize_terminal_values, DEFAULT_TRIAL_COUNT};
pub use results::{ProjectionResult, ScenarioSummary};
pub use engine::{EngineConfig, ProjectionEngine, ProjectionProgress};
