//! Feasibility policies and the evaluation context candidates are scored in.
//!
//! A run uses exactly one [`FeasibilityPolicy`]:
//!
//! - [`Repair`](FeasibilityPolicy::Repair): overweight selections are
//!   thinned out until they fit, then scored by raw value.
//! - [`Penalty`](FeasibilityPolicy::Penalty): selections are left as-is and
//!   an overweight score is scaled by `capacity / weight`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::Error;

/// How an overweight candidate is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeasibilityPolicy {
    /// Deselect random included items until the weight limit holds.
    #[default]
    #[serde(alias = "r")]
    Repair,

    /// Keep the selection, degrade fitness to `floor(capacity * value / weight)`.
    #[serde(alias = "p")]
    Penalty,
}

impl fmt::Display for FeasibilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeasibilityPolicy::Repair => f.write_str("repair"),
            FeasibilityPolicy::Penalty => f.write_str("penalty"),
        }
    }
}

impl FromStr for FeasibilityPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repair" | "r" => Ok(FeasibilityPolicy::Repair),
            "penalty" | "p" => Ok(FeasibilityPolicy::Penalty),
            other => Err(Error::configuration(format!(
                "unrecognized feasibility policy '{other}' (expected 'repair' or 'penalty')"
            ))),
        }
    }
}

/// Penalized score for a selection of raw value `value` and weight `weight`.
///
/// Returns `value` unchanged when `weight <= capacity`, otherwise
/// `floor(capacity * value / weight)`. A zero divisor scores 0.
pub fn penalized_fitness(capacity: u64, value: u64, weight: u64) -> u64 {
    if weight <= capacity {
        return value;
    }
    // u128 keeps the product exact for any u64 inputs.
    (capacity as u128 * value as u128)
        .checked_div(weight as u128)
        .map_or(0, |f| f as u64)
}

/// Everything needed to score a selection: the catalog, the capacity, the
/// active policy, and the weight limit repair must reach.
///
/// The weight limit equals the capacity except when seeding the first
/// generation under the repair policy, where it is relaxed by a slack
/// fraction (see [`relaxed`](Self::relaxed)).
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    catalog: &'a Catalog,
    policy: FeasibilityPolicy,
    capacity: u64,
    weight_limit: f64,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator with the strict limit `weight <= capacity`.
    pub fn new(catalog: &'a Catalog, policy: FeasibilityPolicy, capacity: u64) -> Self {
        Self {
            catalog,
            policy,
            capacity,
            weight_limit: capacity as f64,
        }
    }

    /// Relaxes the repair limit to `capacity * (1 + slack)`.
    ///
    /// Has no effect under the penalty policy, which always scores against
    /// the strict capacity.
    pub fn relaxed(mut self, slack: f64) -> Self {
        if self.policy == FeasibilityPolicy::Repair {
            self.weight_limit = self.capacity as f64 * (1.0 + slack.max(0.0));
        }
        self
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn policy(&self) -> FeasibilityPolicy {
        self.policy
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Upper bound on weight that repair enforces.
    pub fn weight_limit(&self) -> f64 {
        self.weight_limit
    }

    /// Whether `weight` is within the repair limit.
    pub fn fits(&self, weight: u64) -> bool {
        weight as f64 <= self.weight_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_pairs(&[(10, 60), (20, 100), (30, 120)]).unwrap()
    }

    #[test]
    fn test_penalty_scenario() {
        // weight 60 > 50: floor(50 * 280 / 60) = 233
        assert_eq!(penalized_fitness(50, 280, 60), 233);
    }

    #[test]
    fn test_penalty_feasible_is_raw_value() {
        assert_eq!(penalized_fitness(50, 160, 30), 160);
        assert_eq!(penalized_fitness(50, 160, 50), 160);
    }

    #[test]
    fn test_penalty_zero_weight_guard() {
        assert_eq!(penalized_fitness(50, 0, 0), 0);
        assert_eq!(penalized_fitness(0, 0, 0), 0);
    }

    #[test]
    fn test_penalty_large_values_do_not_overflow() {
        let f = penalized_fitness(u64::MAX / 2, u64::MAX / 2, u64::MAX);
        assert!(f < u64::MAX / 2);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("repair".parse::<FeasibilityPolicy>().unwrap(), FeasibilityPolicy::Repair);
        assert_eq!("R".parse::<FeasibilityPolicy>().unwrap(), FeasibilityPolicy::Repair);
        assert_eq!(" Penalty ".parse::<FeasibilityPolicy>().unwrap(), FeasibilityPolicy::Penalty);
        assert_eq!("p".parse::<FeasibilityPolicy>().unwrap(), FeasibilityPolicy::Penalty);
        assert!(matches!(
            "greedy".parse::<FeasibilityPolicy>(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_policy_display_round_trips() {
        for policy in [FeasibilityPolicy::Repair, FeasibilityPolicy::Penalty] {
            assert_eq!(policy.to_string().parse::<FeasibilityPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_relaxed_limit_only_for_repair() {
        let catalog = catalog();
        let repair = Evaluator::new(&catalog, FeasibilityPolicy::Repair, 100).relaxed(0.05);
        assert!((repair.weight_limit() - 105.0).abs() < 1e-9);
        assert!(repair.fits(105));
        assert!(!repair.fits(106));

        let penalty = Evaluator::new(&catalog, FeasibilityPolicy::Penalty, 100).relaxed(0.05);
        assert!((penalty.weight_limit() - 100.0).abs() < 1e-9);
    }
}
