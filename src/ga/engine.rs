//! One generational step: selection → crossover → mutation → replacement.
//!
//! [`EvolutionEngine::evolve`] derives generation `g + 1` purely from
//! generation `g`:
//!
//! 1. Draw `crossover_count` parents by roulette wheel without replacement,
//!    two at a time, from a working list of references into the parent
//!    population.
//! 2. Each pair yields one child by single-point crossover, born in
//!    generation `g + 1`, resolved under the active feasibility policy and
//!    mutated with probability `mutation_rate`.
//! 3. Children and all parents are pooled, ranked by fitness, and cut back
//!    to `population_size`.

use rand::Rng;
use tracing::{debug, instrument};

use super::config::KnapsackConfig;
use super::fitness::Evaluator;
use super::operators::single_point_crossover;
use super::population::{Generation, Population};
use super::selection::roulette_wheel;
use super::types::Candidate;
use crate::catalog::Catalog;
use crate::error::Result;

/// Breeds generations for one catalog under one configuration.
#[derive(Debug, Clone)]
pub struct EvolutionEngine<'a> {
    catalog: &'a Catalog,
    config: KnapsackConfig,
}

impl<'a> EvolutionEngine<'a> {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    /// [`Error::Configuration`](crate::Error::Configuration) if `config` is
    /// invalid.
    pub fn new(catalog: &'a Catalog, config: KnapsackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn config(&self) -> &KnapsackConfig {
        &self.config
    }

    /// Evaluator with the strict `weight <= capacity` limit.
    pub fn evaluator(&self) -> Evaluator<'a> {
        Evaluator::new(self.catalog, self.config.policy, self.config.capacity)
    }

    /// Builds generation 0 from `population_size` uniformly random
    /// candidates. Under the repair policy they are repaired only down to
    /// `capacity * (1 + initial_slack)`.
    pub fn seed<R: Rng>(&self, rng: &mut R) -> Generation {
        let evaluator = self.evaluator().relaxed(self.config.initial_slack);
        let candidates: Vec<Candidate> = (0..self.config.population_size)
            .map(|_| Candidate::random(0, &evaluator, rng))
            .collect();
        let population = Population::ranked(candidates, self.config.population_size);
        debug!(
            best = population.best().fitness(),
            size = population.len(),
            "seeded generation 0"
        );
        Generation::new(0, population)
    }

    /// Produces the generation following `parent`.
    ///
    /// # Errors
    /// [`Error::SelectionExhausted`](crate::Error::SelectionExhausted) if the
    /// roulette wheel runs out of positive-fitness parents before the
    /// crossover target is met. No partial generation is returned.
    #[instrument(level = "debug", skip_all, fields(generation = parent.index()))]
    pub fn evolve<R: Rng>(&self, parent: &Generation, rng: &mut R) -> Result<Generation> {
        let evaluator = self.evaluator();
        let birth = parent.index() + 1;
        let target = self.config.crossover_count();

        let mut pool: Vec<&Candidate> = parent.population().iter().collect();
        let mut offspring: Vec<Candidate> = Vec::with_capacity(target / 2);

        while offspring.len() * 2 < target {
            let a = roulette_wheel(&mut pool, rng)?;
            let b = roulette_wheel(&mut pool, rng)?;

            let selection = single_point_crossover(a.selection(), b.selection());
            let mut child = Candidate::new(selection, birth, &evaluator, rng)?;
            if rng.random::<f64>() < self.config.mutation_rate {
                child.mutate(&evaluator, rng);
            }
            offspring.push(child);
        }

        let children = offspring.len();
        offspring.extend(parent.population().iter().cloned());
        let population = Population::ranked(offspring, self.config.population_size);

        debug!(
            children,
            best = population.best().fitness(),
            worst = population.worst().fitness(),
            "bred generation {birth}"
        );
        Ok(Generation::new(birth, population))
    }
}
