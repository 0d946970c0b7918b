//! Candidate representation.
//!
//! A [`Candidate`] is one knapsack: a selection bit per catalog item plus the
//! values derived from it. Every constructor and every in-place change runs
//! the active feasibility policy before returning, so `fitness()` and
//! `weight()` always describe the current selection.

use std::fmt;

use rand::Rng;
use serde::{Serialize, Serializer};
use tracing::trace;

use super::fitness::{penalized_fitness, Evaluator, FeasibilityPolicy};
use super::operators::flip_mutation;
use crate::error::{Error, Result};

/// Anything that carries a fitness score.
///
/// Higher fitness is better (maximization). Selection and ordering only
/// ever look at this value.
pub trait Individual {
    fn fitness(&self) -> u64;
}

impl<T: Individual + ?Sized> Individual for &T {
    fn fitness(&self) -> u64 {
        (**self).fitness()
    }
}

/// One candidate knapsack.
///
/// Two candidates with identical selections are still distinct values;
/// ordering between candidates uses fitness only.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    #[serde(serialize_with = "serialize_bits")]
    selection: Vec<bool>,
    fitness: u64,
    weight: u64,
    value: u64,
    birth_generation: usize,
}

impl Candidate {
    /// Creates a candidate from an explicit selection and resolves it under
    /// the evaluator's policy.
    ///
    /// Under the repair policy this may clear bits of `selection`.
    ///
    /// # Errors
    /// [`Error::InvalidCandidate`] if `selection.len()` differs from the
    /// catalog length.
    pub fn new<R: Rng>(
        selection: Vec<bool>,
        birth_generation: usize,
        evaluator: &Evaluator<'_>,
        rng: &mut R,
    ) -> Result<Self> {
        let expected = evaluator.catalog().len();
        if selection.len() != expected {
            return Err(Error::InvalidCandidate {
                expected,
                actual: selection.len(),
            });
        }
        let mut candidate = Self {
            selection,
            fitness: 0,
            weight: 0,
            value: 0,
            birth_generation,
        };
        candidate.resolve(evaluator, rng);
        Ok(candidate)
    }

    /// Creates a candidate whose bits are drawn independently and uniformly.
    pub fn random<R: Rng>(birth_generation: usize, evaluator: &Evaluator<'_>, rng: &mut R) -> Self {
        let selection = (0..evaluator.catalog().len())
            .map(|_| rng.random_bool(0.5))
            .collect();
        let mut candidate = Self {
            selection,
            fitness: 0,
            weight: 0,
            value: 0,
            birth_generation,
        };
        candidate.resolve(evaluator, rng);
        candidate
    }

    /// Flips one random bit, then re-resolves under the evaluator's policy.
    pub fn mutate<R: Rng>(&mut self, evaluator: &Evaluator<'_>, rng: &mut R) {
        flip_mutation(&mut self.selection, rng);
        self.resolve(evaluator, rng);
    }

    fn resolve<R: Rng>(&mut self, evaluator: &Evaluator<'_>, rng: &mut R) {
        match evaluator.policy() {
            FeasibilityPolicy::Repair => self.repair(evaluator, rng),
            FeasibilityPolicy::Penalty => self.penalize(evaluator),
        }
    }

    /// Deselects uniformly chosen included items until the weight is within
    /// the evaluator's limit. Fitness is the value of what remains.
    fn repair<R: Rng>(&mut self, evaluator: &Evaluator<'_>, rng: &mut R) {
        let catalog = evaluator.catalog();
        let mut weight = catalog.weight_of(&self.selection);

        if !evaluator.fits(weight) {
            let mut included: Vec<usize> = self
                .selection
                .iter()
                .enumerate()
                .filter_map(|(i, &bit)| bit.then_some(i))
                .collect();

            while !evaluator.fits(weight) && !included.is_empty() {
                let k = rng.random_range(0..included.len());
                let i = included.swap_remove(k);
                self.selection[i] = false;
                weight -= catalog[i].weight;
                trace!(item = i, weight, "repair dropped item");
            }
        }

        self.weight = weight;
        self.value = catalog.value_of(&self.selection);
        self.fitness = self.value;
    }

    /// Scores the selection as-is, scaling down an overweight score.
    fn penalize(&mut self, evaluator: &Evaluator<'_>) {
        let catalog = evaluator.catalog();
        self.weight = catalog.weight_of(&self.selection);
        self.value = catalog.value_of(&self.selection);
        self.fitness = penalized_fitness(evaluator.capacity(), self.value, self.weight);
    }

    /// Selection bits; `selection()[i]` is `true` when item `i` is packed.
    pub fn selection(&self) -> &[bool] {
        &self.selection
    }

    /// Policy-dependent score.
    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    /// Total weight of the packed items.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Raw value of the packed items, before any penalty.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Generation index this candidate was produced in (0 for seeds).
    pub fn birth_generation(&self) -> usize {
        self.birth_generation
    }

    /// Number of packed items.
    pub fn item_count(&self) -> usize {
        self.selection.iter().filter(|&&b| b).count()
    }

    /// Selection length, equal to the catalog length.
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }
}

impl Individual for Candidate {
    fn fitness(&self) -> u64 {
        self.fitness
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fitness:{} Weight:{} Selection:[", self.fitness, self.weight)?;
        for (i, &bit) in self.selection.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}

#[allow(clippy::ptr_arg)]
fn serialize_bits<S: Serializer>(bits: &Vec<bool>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(bits.iter().map(|&b| u8::from(b)))
}
