//! Acceptance policies.
//!
//! The Hill Climbing / Simulated Annealing duality is a single capability
//! with two implementations: a policy is asked whether a scored candidate
//! replaces the current solution. This keeps the optimization loop
//! algorithm-agnostic.
//!
//! # References
//!
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated
//!   Annealing"

use rand::{Rng, RngCore};

/// Per-iteration context handed to a policy.
///
/// Carries the temperature produced by the cooling schedule for this
/// iteration. Greedy acceptance ignores it.
#[derive(Debug, Clone, Copy)]
pub struct AcceptContext {
    pub temperature: f64,
}

/// Decides whether a candidate replaces the current solution.
///
/// Policies are stateless beyond their configuration; any randomness
/// comes from the run-owned seeded generator passed in, which keeps
/// repeated runs reproducible.
pub trait AcceptancePolicy: Send {
    /// Returns true when the candidate should replace the current
    /// solution.
    fn decide(
        &self,
        current_cost: f64,
        candidate_cost: f64,
        ctx: &AcceptContext,
        rng: &mut dyn RngCore,
    ) -> bool;
}

/// Hill Climbing acceptance: strict improvement only.
///
/// Equal-cost candidates are rejected, so every accepted solution has a
/// cost strictly lower than its predecessor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl AcceptancePolicy for Greedy {
    fn decide(
        &self,
        current_cost: f64,
        candidate_cost: f64,
        _ctx: &AcceptContext,
        _rng: &mut dyn RngCore,
    ) -> bool {
        candidate_cost < current_cost
    }
}

/// Metropolis acceptance for Simulated Annealing.
///
/// Improving candidates are always accepted; a worsening candidate is
/// accepted with probability `exp(-(c1 - c0) / T)`. Once the temperature
/// is at or below the configured floor the policy behaves as pure
/// [`Greedy`] for the remaining iterations, which also guards the
/// exponent against division by a vanishing temperature.
#[derive(Debug, Clone, Copy)]
pub struct Metropolis {
    floor: f64,
}

impl Metropolis {
    pub fn new(floor: f64) -> Self {
        Self { floor }
    }
}

impl AcceptancePolicy for Metropolis {
    fn decide(
        &self,
        current_cost: f64,
        candidate_cost: f64,
        ctx: &AcceptContext,
        rng: &mut dyn RngCore,
    ) -> bool {
        if candidate_cost < current_cost {
            return true;
        }
        if ctx.temperature <= self.floor {
            return false;
        }
        let delta = candidate_cost - current_cost;
        let probability = (-delta / ctx.temperature).exp();
        rng.random_range(0.0..1.0) < probability
    }
}
