//! Populations and generations.
//!
//! A [`Population`] is always non-empty and sorted by fitness, best first.
//! A [`Generation`] pairs a population with its index and is never modified
//! after it is built.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use super::types::Candidate;

/// Candidates of one generation, sorted by fitness descending.
///
/// Ties keep their incoming order (stable sort).
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Population {
    candidates: Vec<Candidate>,
}

impl Population {
    /// Sorts `candidates` best-first and keeps at most `size` of them.
    ///
    /// Callers guarantee `candidates` is non-empty and `size >= 1`.
    pub(crate) fn ranked(mut candidates: Vec<Candidate>, size: usize) -> Self {
        debug_assert!(!candidates.is_empty() && size > 0);
        candidates.sort_by(|a, b| b.fitness().cmp(&a.fitness()));
        candidates.truncate(size);
        Self { candidates }
    }

    /// Highest-fitness candidate.
    pub fn best(&self) -> &Candidate {
        &self.candidates[0]
    }

    /// Lowest-fitness candidate.
    pub fn worst(&self) -> &Candidate {
        &self.candidates[self.candidates.len() - 1]
    }

    /// Mean fitness across the population.
    pub fn mean_fitness(&self) -> f64 {
        let sum: f64 = self.candidates.iter().map(|c| c.fitness() as f64).sum();
        sum / self.candidates.len() as f64
    }
}

impl Deref for Population {
    type Target = [Candidate];

    fn deref(&self) -> &[Candidate] {
        &self.candidates
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// A population snapshot and its position in the run.
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    index: usize,
    population: Population,
}

impl Generation {
    pub(crate) fn new(index: usize, population: Population) -> Self {
        Self { index, population }
    }

    /// Zero-based generation index; 0 is the seeded population.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Number of candidates in this generation.
    pub fn len(&self) -> usize {
        self.population.len()
    }

    /// Always `false`: populations are never empty.
    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    pub fn best(&self) -> &Candidate {
        self.population.best()
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation {} with {} individuals.",
            self.index,
            self.population.len()
        )
    }
}
