//! Generation driver.
//!
//! [`GenerationDriver`] owns the run-scoped random generator, seeds
//! generation 0, and calls [`EvolutionEngine::evolve`] once per generation
//! until `max_generations` have been produced or an error stops the run.

use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::config::{KnapsackConfig, Retention};
use super::engine::EvolutionEngine;
use super::population::Generation;
use super::types::Candidate;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::random::run_rng;

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// The best candidate seen during the run.
    pub best: Candidate,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: u64,

    /// Number of generations produced after the seeded one.
    pub generations: usize,

    /// Best fitness of each generation, starting with generation 0.
    pub fitness_history: Vec<u64>,
}

/// Drives a run from the seeded generation to `max_generations`.
///
/// # Usage
///
/// ```
/// use knapsack_ga::{Catalog, ga::{GenerationDriver, KnapsackConfig}};
///
/// let catalog = Catalog::from_pairs(&[(10, 60), (20, 100), (30, 120), (15, 70)]).unwrap();
/// let config = KnapsackConfig::default()
///     .with_capacity(50)
///     .with_population_size(8)
///     .with_max_generations(20)
///     .with_seed(42);
///
/// let mut driver = GenerationDriver::new(&catalog, config).unwrap();
/// let summary = driver.run().unwrap();
/// assert!(summary.best.weight() <= 50);
/// ```
pub struct GenerationDriver<'a> {
    engine: EvolutionEngine<'a>,
    rng: StdRng,
    generations: Vec<Generation>,
    best: Candidate,
    fitness_history: Vec<u64>,
}

impl<'a> GenerationDriver<'a> {
    /// Validates `config` and seeds generation 0.
    ///
    /// # Errors
    /// [`Error::Configuration`](crate::Error::Configuration) if `config` is
    /// invalid.
    pub fn new(catalog: &'a Catalog, config: KnapsackConfig) -> Result<Self> {
        let mut rng = run_rng(config.seed);
        let engine = EvolutionEngine::new(catalog, config)?;
        let gen0 = engine.seed(&mut rng);
        let best = gen0.best().clone();
        let fitness_history = vec![best.fitness()];

        let capacity = match engine.config().retention {
            Retention::All => engine.config().max_generations.saturating_add(1),
            Retention::Latest => 1,
        };
        let mut generations = Vec::with_capacity(capacity);
        generations.push(gen0);

        Ok(Self {
            engine,
            rng,
            generations,
            best,
            fitness_history,
        })
    }

    pub fn config(&self) -> &KnapsackConfig {
        self.engine.config()
    }

    /// The most recent generation.
    pub fn current(&self) -> &Generation {
        // `generations` always holds at least the seeded generation.
        &self.generations[self.generations.len() - 1]
    }

    /// Retained generations, oldest first. With [`Retention::Latest`] this is
    /// just the current generation.
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    /// Best candidate seen so far.
    pub fn best(&self) -> &Candidate {
        &self.best
    }

    /// Whether `max_generations` have been produced.
    pub fn is_finished(&self) -> bool {
        self.current().index() >= self.config().max_generations
    }

    /// Evolves exactly one generation and returns it.
    ///
    /// # Errors
    /// Propagates [`Error::SelectionExhausted`](crate::Error::SelectionExhausted)
    /// from the engine; the current generation is left unchanged.
    pub fn step(&mut self) -> Result<&Generation> {
        let parent = &self.generations[self.generations.len() - 1];
        let next = self.engine.evolve(parent, &mut self.rng)?;

        let gen_best = next.best();
        if gen_best.fitness() > self.best.fitness() {
            self.best = gen_best.clone();
        }
        self.fitness_history.push(gen_best.fitness());
        debug!(
            generation = next.index(),
            best = gen_best.fitness(),
            mean = next.population().mean_fitness(),
            "generation complete"
        );

        if self.engine.config().retention == Retention::Latest {
            self.generations.clear();
        }
        self.generations.push(next);
        Ok(self.current())
    }

    /// Runs to `max_generations`.
    pub fn run(&mut self) -> Result<RunSummary> {
        self.run_with_observer(|_| {})
    }

    /// Runs to `max_generations`, calling `observer` with generation 0 (if
    /// not yet stepped past) and with every generation produced.
    ///
    /// # Errors
    /// The first engine error stops the run and is returned as-is.
    pub fn run_with_observer<F: FnMut(&Generation)>(&mut self, mut observer: F) -> Result<RunSummary> {
        let config = self.engine.config();
        info!(
            items = self.engine.catalog().len(),
            capacity = config.capacity,
            population = config.population_size,
            generations = config.max_generations,
            policy = %config.policy,
            "starting run"
        );

        if self.current().index() == 0 {
            observer(self.current());
        }
        while !self.is_finished() {
            match self.step() {
                Ok(generation) => observer(generation),
                Err(e) => {
                    warn!(generation = self.current().index(), error = %e, "run aborted");
                    return Err(e);
                }
            }
        }

        info!(
            best = self.best.fitness(),
            weight = self.best.weight(),
            generations = self.current().index(),
            "run finished"
        );
        Ok(self.summary())
    }

    /// Summary of the run so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            best_fitness: self.best.fitness(),
            best: self.best.clone(),
            generations: self.current().index(),
            fitness_history: self.fitness_history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ga::fitness::FeasibilityPolicy;

    fn catalog() -> Catalog {
        let pairs: Vec<(u64, u64)> = (0..20)
            .map(|i| (3 + (i * 11) % 17, 4 + (i * 5) % 29))
            .collect();
        Catalog::from_pairs(&pairs).unwrap()
    }

    fn config() -> KnapsackConfig {
        KnapsackConfig::default()
            .with_capacity(60)
            .with_population_size(16)
            .with_max_generations(40)
            .with_seed(42)
    }

    #[test]
    fn test_run_produces_max_generations() {
        let catalog = catalog();
        let mut driver = GenerationDriver::new(&catalog, config()).unwrap();
        let summary = driver.run().unwrap();

        assert_eq!(summary.generations, 40);
        assert_eq!(summary.fitness_history.len(), 41);
        assert_eq!(driver.current().index(), 40);
        assert_eq!(driver.current().len(), 16);
        assert!(driver.is_finished());
        assert_eq!(summary.best_fitness, summary.best.fitness());
        assert!(summary.best.weight() <= 60 || summary.best.birth_generation() == 0);
    }

    #[test]
    fn test_fitness_history_never_decreases() {
        let catalog = catalog();
        let mut driver = GenerationDriver::new(&catalog, config()).unwrap();
        let summary = driver.run().unwrap();

        for w in summary.fitness_history.windows(2) {
            assert!(w[1] >= w[0], "best fitness dropped: {} -> {}", w[0], w[1]);
        }
        assert_eq!(summary.best_fitness, *summary.fitness_history.last().unwrap());
    }

    #[test]
    fn test_same_seed_same_run() {
        let catalog = catalog();
        let a = GenerationDriver::new(&catalog, config()).unwrap().run().unwrap();
        let b = GenerationDriver::new(&catalog, config()).unwrap().run().unwrap();
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.best.selection(), b.best.selection());
    }

    #[test]
    fn test_retention_latest_keeps_one() {
        let catalog = catalog();
        let mut driver = GenerationDriver::new(&catalog, config()).unwrap();
        driver.run().unwrap();
        assert_eq!(driver.generations().len(), 1);
        assert_eq!(driver.generations()[0].index(), 40);
    }

    #[test]
    fn test_retention_all_keeps_every_generation() {
        let catalog = catalog();
        let config = config().with_retention(Retention::All);
        let mut driver = GenerationDriver::new(&catalog, config).unwrap();
        driver.run().unwrap();

        let indices: Vec<usize> = driver.generations().iter().map(|g| g.index()).collect();
        assert_eq!(indices, (0..=40).collect::<Vec<_>>());
        // Every generation after the first is exactly population_size.
        assert!(driver.generations().iter().all(|g| g.len() == 16));
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let catalog = catalog();
        let mut driver = GenerationDriver::new(&catalog, config()).unwrap();
        let mut seen = Vec::new();
        driver
            .run_with_observer(|g| seen.push((g.index(), g.len())))
            .unwrap();

        assert_eq!(seen.len(), 41);
        assert_eq!(seen[0], (0, 16));
        assert_eq!(seen[40], (40, 16));
    }

    #[test]
    fn test_step_advances_one_generation() {
        let catalog = catalog();
        let mut driver = GenerationDriver::new(&catalog, config()).unwrap();
        assert_eq!(driver.current().index(), 0);
        assert_eq!(driver.step().unwrap().index(), 1);
        assert_eq!(driver.step().unwrap().index(), 2);
        assert!(!driver.is_finished());
    }

    #[test]
    fn test_penalty_run() {
        let catalog = catalog();
        let config = config().with_policy(FeasibilityPolicy::Penalty);
        let mut driver = GenerationDriver::new(&catalog, config).unwrap();
        let summary = driver.run().unwrap();

        for c in driver.current().population() {
            assert!(c.fitness() <= c.value());
        }
        assert!(summary.best_fitness > 0);
    }

    #[test]
    fn test_run_finds_good_solution() {
        // Four "gold" items (weight 10, value 100) among 16 decoys.
        let mut pairs = vec![(10u64, 100u64); 4];
        pairs.extend(std::iter::repeat((10, 5)).take(16));
        let catalog = Catalog::from_pairs(&pairs).unwrap();
        let config = KnapsackConfig::default()
            .with_capacity(40)
            .with_population_size(30)
            .with_max_generations(300)
            .with_mutation_rate(0.3)
            .with_seed(42);

        let summary = GenerationDriver::new(&catalog, config).unwrap().run().unwrap();
        assert!(
            summary.best_fitness >= 300,
            "expected at least three gold items, got {}",
            summary.best_fitness
        );
    }

    #[test]
    fn test_exhaustion_stops_run() {
        let catalog = Catalog::from_pairs(&[(100, 5), (200, 9)]).unwrap();
        let config = KnapsackConfig::default()
            .with_capacity(10)
            .with_population_size(4)
            .with_initial_slack(0.0)
            .with_max_generations(5);
        let mut driver = GenerationDriver::new(&catalog, config).unwrap();

        let err = driver.run().unwrap_err();
        assert!(matches!(err, Error::SelectionExhausted { .. }));
        assert_eq!(driver.current().index(), 0);
    }

    #[test]
    fn test_invalid_config() {
        let catalog = catalog();
        let config = config().with_max_generations(0);
        assert!(matches!(
            GenerationDriver::new(&catalog, config),
            Err(Error::Configuration(_))
        ));
    }
}
