//! Genetic algorithm for the 0/1 knapsack problem.
//!
//! Candidates are bit strings over the catalog. Each generation draws
//! parents by roulette wheel without replacement, pairs them through a
//! midpoint single-point crossover, mutates children with a single bit flip,
//! and keeps the best `population_size` of children and parents together.
//!
//! # Key Types
//!
//! - [`KnapsackConfig`]: Run parameters (capacity, rates, policy, seed)
//! - [`Candidate`]: A selection vector with its fitness, weight and value
//! - [`Population`] / [`Generation`]: Ranked candidates and their index
//! - [`EvolutionEngine`]: Seeding and one-generation `evolve`
//! - [`GenerationDriver`]: Runs the loop and reports a [`RunSummary`]
//!
//! # Submodules
//!
//! - [`operators`]: Single-point crossover and bit-flip mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution Programs*, ch. 11

mod config;
mod engine;
mod fitness;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::{KnapsackConfig, Retention};
pub use engine::EvolutionEngine;
pub use fitness::{penalized_fitness, Evaluator, FeasibilityPolicy};
pub use population::{Generation, Population};
pub use runner::{GenerationDriver, RunSummary};
pub use selection::roulette_wheel;
pub use types::{Candidate, Individual};
