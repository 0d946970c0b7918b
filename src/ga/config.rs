//! GA configuration.
//!
//! [`KnapsackConfig`] holds every tunable of a run. It is an immutable value
//! handed to the engine and driver; nothing reads run parameters from
//! globals.

use std::path::Path;

use serde::Deserialize;

use super::fitness::FeasibilityPolicy;
use crate::error::{Error, Result};

/// Which generations the driver keeps in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Retention {
    /// Keep every generation produced during the run.
    All,
    /// Keep only the most recent generation.
    #[default]
    Latest,
}

/// Configuration for the knapsack GA.
///
/// # Defaults
///
/// ```
/// use knapsack_ga::ga::KnapsackConfig;
///
/// let config = KnapsackConfig::default();
/// assert_eq!(config.capacity, 120);
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 25_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use knapsack_ga::ga::{FeasibilityPolicy, KnapsackConfig};
///
/// let config = KnapsackConfig::default()
///     .with_capacity(50)
///     .with_population_size(20)
///     .with_policy(FeasibilityPolicy::Penalty)
///     .with_mutation_rate(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KnapsackConfig {
    /// Maximum total weight a feasible knapsack may carry.
    pub capacity: u64,

    /// Number of candidates per generation. Must be even and at least 2.
    pub population_size: usize,

    /// Probability that a child receives a one-bit mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Fraction of the population drawn as parents each generation (0.0–1.0).
    ///
    /// `floor(rate * population_size)`, rounded up to even, parents are
    /// drawn; every pair yields one child.
    pub reproduction_rate: f64,

    /// Number of generations to produce after the seeded one.
    pub max_generations: usize,

    /// How overweight candidates are resolved.
    pub policy: FeasibilityPolicy,

    /// Extra weight fraction tolerated when seeding generation 0 under the
    /// repair policy, e.g. 0.05 allows `capacity * 1.05`.
    pub initial_slack: f64,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Which generations the driver retains.
    pub retention: Retention,
}

impl Default for KnapsackConfig {
    fn default() -> Self {
        Self {
            capacity: 120,
            population_size: 50,
            mutation_rate: 0.05,
            reproduction_rate: 0.5,
            max_generations: 500 * 50,
            policy: FeasibilityPolicy::Repair,
            initial_slack: 0.05,
            seed: None,
            retention: Retention::Latest,
        }
    }
}

impl KnapsackConfig {
    /// Sets the knapsack capacity.
    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the reproduction rate.
    pub fn with_reproduction_rate(mut self, rate: f64) -> Self {
        self.reproduction_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of generations to run.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the feasibility policy.
    pub fn with_policy(mut self, policy: FeasibilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the seeding slack for the repair policy.
    pub fn with_initial_slack(mut self, slack: f64) -> Self {
        self.initial_slack = slack.max(0.0);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the retention mode.
    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    /// Number of parents drawn per generation: `floor(rate * population)`,
    /// bumped to the next even number.
    pub fn crossover_count(&self) -> usize {
        let n = (self.reproduction_rate * self.population_size as f64).floor() as usize;
        n + n % 2
    }

    /// Number of children bred per generation.
    pub fn offspring_count(&self) -> usize {
        self.crossover_count() / 2
    }

    /// Parses a TOML document. Missing keys take their default.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::ConfigFile {
            path: "<inline>".into(),
            reason: e.to_string(),
        })
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`Error::Configuration`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::configuration("capacity must be positive"));
        }
        if self.population_size < 2 {
            return Err(Error::configuration("population_size must be at least 2"));
        }
        if self.population_size % 2 != 0 {
            return Err(Error::configuration("population_size must be even"));
        }
        if self.max_generations == 0 {
            return Err(Error::configuration("max_generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::configuration("mutation_rate must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.reproduction_rate) {
            return Err(Error::configuration(
                "reproduction_rate must be within [0, 1]",
            ));
        }
        if !self.initial_slack.is_finite() || self.initial_slack < 0.0 {
            return Err(Error::configuration(
                "initial_slack must be a finite non-negative fraction",
            ));
        }
        // An even population and a rate in [0, 1] already keep the even
        // crossover target within the population.
        debug_assert!(self.crossover_count() <= self.population_size);
        Ok(())
    }
}
