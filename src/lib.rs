//! Genetic algorithm solver for the 0/1 knapsack problem.
//!
//! Given a fixed catalog of weighted, valued items and a capacity, the
//! solver evolves a population of item selections toward high total value.
//! Overweight selections are either repaired (random items dropped until
//! they fit) or penalized (score scaled by `capacity / weight`).
//!
//! - [`catalog`]: Item inventory and CSV loading
//! - [`ga`]: Candidates, operators, the evolution engine and the run driver
//! - [`random`]: The single run-scoped random generator
//!
//! # Example
//!
//! ```
//! use knapsack_ga::Catalog;
//! use knapsack_ga::ga::{FeasibilityPolicy, GenerationDriver, KnapsackConfig};
//!
//! let catalog = Catalog::from_reader("0,10,60\n1,20,100\n2,30,120\n".as_bytes())?;
//! let config = KnapsackConfig::default()
//!     .with_capacity(50)
//!     .with_population_size(4)
//!     .with_max_generations(10)
//!     .with_policy(FeasibilityPolicy::Repair)
//!     .with_seed(1);
//!
//! let summary = GenerationDriver::new(&catalog, config)?.run()?;
//! assert!(summary.best.weight() <= 50 || summary.best.birth_generation() == 0);
//! # Ok::<(), knapsack_ga::Error>(())
//! ```

pub mod catalog;
pub mod error;
pub mod ga;
pub mod random;

pub use catalog::{Catalog, DataSourceError, Item};
pub use error::{Error, Result};
