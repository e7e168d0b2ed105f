//! Clustering solutions as immutable value types.
//!
//! A [`Solution`] maps every point of a fixed [`Dataset`] to a cluster
//! label and maintains per-cluster coordinate sums so centroids can be
//! updated incrementally when a [`Move`] is applied, instead of being
//! recomputed from scratch.
//!
//! Solutions are never mutated once handed out: applying a move produces
//! a new `Solution`.

mod moves;
mod types;

pub use moves::Move;
pub use types::{Dataset, DatasetError, Solution, SolutionError};
