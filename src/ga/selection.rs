//! Fitness-proportionate parent selection.
//!
//! Parents are drawn by roulette wheel *without replacement*: each draw
//! removes the winner from the working pool, so one pairing round can never
//! pick the same individual twice.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use super::types::Individual;
use crate::error::{Error, Result};

/// Spins the roulette wheel once over `pool` and removes the winner.
///
/// Draws `target` uniformly from `[0, 1)` and walks the pool accumulating
/// `fitness / total`; the first individual whose running share exceeds
/// `target` wins. Zero-fitness individuals can never win.
///
/// Pool order of the remaining individuals is preserved.
///
/// # Errors
/// [`Error::SelectionExhausted`] when the pool is empty or its total fitness
/// is zero.
///
/// # Complexity
/// O(n) per spin
pub fn roulette_wheel<I: Individual, R: Rng>(pool: &mut Vec<I>, rng: &mut R) -> Result<I> {
    let total: f64 = pool.iter().map(|ind| ind.fitness() as f64).sum();
    if pool.is_empty() || total <= 0.0 {
        return Err(Error::SelectionExhausted {
            remaining: pool.len(),
        });
    }

    let target: f64 = rng.random();
    let mut running = 0.0;
    let mut winner = None;
    for (i, ind) in pool.iter().enumerate() {
        let fitness = ind.fitness();
        if fitness == 0 {
            continue;
        }
        running += fitness as f64 / total;
        winner = Some(i);
        if running > target {
            break;
        }
    }

    // Rounding can leave `running` a hair below a target near 1.0; the last
    // positive-fitness individual is the one that owns that slice.
    let idx = winner.ok_or(Error::SelectionExhausted {
        remaining: pool.len(),
    })?;
    Ok(pool.remove(idx))
}
