//! Run-scoped random number generation.
//!
//! A run draws every random decision (seeding, roulette spins, crossover
//! children, mutation, repair) from one generator created here and passed
//! down by `&mut`.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates the generator for one run: seeded when `seed` is given,
/// otherwise from fresh entropy.
pub fn run_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
