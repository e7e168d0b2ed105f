//! Local-search refinement engine for clustering solutions.
//!
//! Takes an existing point-to-cluster assignment over a fixed dataset and
//! improves it with single-solution trajectory heuristics:
//!
//! - **Hill Climbing**: steepest-descent scanning of the reassignment
//!   neighborhood, accepting only strict improvements.
//! - **Simulated Annealing**: one sampled candidate per iteration with
//!   Metropolis acceptance and a pluggable cooling schedule.
//!
//! # Architecture
//!
//! The crate contains only the optimization core. Producing the initial
//! clustering, loading data, plotting, and exporting results all live in
//! consumers; they interact through [`solution::Solution`] /
//! [`solution::Dataset`] on the way in and [`engine::RunSnapshot`] on the
//! way out. Each [`engine::OptimizationRun`] is one sequential search
//! chain with its own seeded random generator and its own
//! [`history::HistoryManager`] undo/redo log, so side-by-side runs are
//! fully isolated and reproducible.

pub mod accept;
pub mod cooling;
pub mod cost;
pub mod engine;
pub mod history;
pub mod neighbor;
pub mod solution;
