//! Binary-string genetic operators.
//!
//! These operate on plain `&[bool]` selection vectors and know nothing about
//! weights or values; re-scoring after a change is the caller's job (see
//! [`Candidate::mutate`](super::Candidate::mutate)).
//!
//! # Crossover
//!
//! - [`single_point_crossover`]: head of parent A, tail of parent B, cut at
//!   the midpoint
//!
//! # Mutation
//!
//! - [`flip_mutation`]: invert one uniformly chosen bit — O(1)

use rand::Rng;

/// Single-point crossover at `floor(n / 2)`.
///
/// The child is a fresh vector: `parent_a[..half] ++ parent_b[half..]`.
/// Neither parent is modified.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn single_point_crossover(parent_a: &[bool], parent_b: &[bool]) -> Vec<bool> {
    let n = parent_a.len();
    assert_eq!(n, parent_b.len(), "parents must have equal length");

    let half = n / 2;
    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&parent_a[..half]);
    child.extend_from_slice(&parent_b[half..]);
    child
}

/// Flips exactly one uniformly chosen bit in place.
///
/// Returns the flipped position, or `None` for an empty selection.
pub fn flip_mutation<R: Rng>(selection: &mut [bool], rng: &mut R) -> Option<usize> {
    if selection.is_empty() {
        return None;
    }
    let i = rng.random_range(0..selection.len());
    selection[i] = !selection[i];
    Some(i)
}
