//! Random sources for trial simulation
//!
//! The simulator only needs "one standard-normal variate per period". Each
//! trial owns its own source, built by a [`NormalSourceFactory`] from a
//! 64-bit stream seed, so no generator is ever shared between trials or
//! threads.

use std::hash::{Hash, Hasher};

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::StandardNormal;
use rustc_hash::FxHasher;

/// Produces independent standard-normal variates
pub trait NormalSource {
    fn standard_normal(&mut self) -> f64;
}

impl<S: NormalSource + ?Sized> NormalSource for &mut S {
    fn standard_normal(&mut self) -> f64 {
        (**self).standard_normal()
    }
}

/// Standard-normal draws from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngNormals<R> {
    rng: R,
}

impl<R: Rng> RngNormals<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngNormals<SmallRng> {
    /// Fast, statistically sound generator seeded for reproducibility
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NormalSource for RngNormals<R> {
    fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Always draws zero, removing the noise term from every period
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseFree;

impl NormalSource for NoiseFree {
    fn standard_normal(&mut self) -> f64 {
        0.0
    }
}

/// Builds one private [`NormalSource`] per trial
///
/// Factories are shared across worker threads; the sources they build are not.
pub trait NormalSourceFactory: Sync {
    type Source: NormalSource;

    fn source_for(&self, stream_seed: u64) -> Self::Source;
}

/// Default factory: one `SmallRng` per trial stream
#[derive(Debug, Clone, Copy, Default)]
pub struct SeededNormals;

impl NormalSourceFactory for SeededNormals {
    type Source = RngNormals<SmallRng>;

    fn source_for(&self, stream_seed: u64) -> Self::Source {
        RngNormals::seeded(stream_seed)
    }
}

impl NormalSourceFactory for NoiseFree {
    type Source = NoiseFree;

    fn source_for(&self, _stream_seed: u64) -> Self::Source {
        NoiseFree
    }
}

/// Fresh base seed from the thread-local OS-seeded generator
pub fn entropy_seed() -> u64 {
    rand::rng().next_u64()
}

/// Seed for one scenario, derived from the base seed and the scenario name
///
/// Keyed by name rather than catalog position, so adding, removing or
/// reordering other scenarios never changes this scenario's stream.
pub fn scenario_seed(base_seed: u64, scenario_name: &str) -> u64 {
    let mut hasher = FxHasher::default();
    base_seed.hash(&mut hasher);
    scenario_name.hash(&mut hasher);
    hasher.finish()
}

/// Per-trial stream seeds, fixed up front so results don't depend on scheduling
pub fn trial_seeds(scenario_seed: u64, trial_count: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(scenario_seed);
    (0..trial_count).map(|_| rng.next_u64()).collect()
}
