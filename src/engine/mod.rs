//! Optimization run engine.
//!
//! An [`OptimizationRun`] drives the search loop: it asks the neighbor
//! generator for candidates, scores them with the cost evaluator, applies
//! the acceptance policy, appends accepted solutions to its history, and
//! advances the iteration counter (and, for Simulated Annealing, the
//! cooling schedule) until a stop condition fires.

mod config;
mod runner;

pub use config::{Algorithm, ConfigError, RecordPolicy, RunConfig};
pub use runner::{OptimizationRun, RunSnapshot, RunState};
