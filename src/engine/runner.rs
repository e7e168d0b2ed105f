//! The optimization run state machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::{Algorithm, ConfigError, RecordPolicy, RunConfig};
use crate::accept::{AcceptContext, AcceptancePolicy, Greedy, Metropolis};
use crate::cooling::Cooling;
use crate::cost::CostEvaluator;
use crate::history::HistoryManager;
use crate::neighbor::{NeighborGenerator, NeighborStrategy};
use crate::solution::{Dataset, Move, Solution};

/// Lifecycle of a run.
///
/// `Ready -> Running -> {Converged, Exhausted, StoppedByUser}`. All three
/// terminal states are ordinary outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// Initial solution set, no iterations performed.
    Ready,

    /// At least one step taken, no stop condition fired yet.
    Running,

    /// The cost target was reached, or no new best solution was found
    /// for the configured number of consecutive iterations.
    Converged,

    /// The iteration budget was spent.
    Exhausted,

    /// The cancellation flag was observed at a step boundary.
    StoppedByUser,
}

impl RunState {
    /// True for the three terminal states.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Converged | RunState::Exhausted | RunState::StoppedByUser
        )
    }
}

/// Read-only view of a run for export and presentation.
///
/// The reported solution is the best accepted one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSnapshot {
    /// Point-to-cluster assignment of the best solution.
    pub assignment: Vec<usize>,

    /// Centroids of the best solution, `None` for empty clusters.
    pub centroids: Vec<Option<Vec<f64>>>,

    /// Cost of the best solution.
    pub cost: f64,

    /// Iterations performed so far.
    pub iterations: usize,

    /// Current run state; the terminal reason once the run has stopped.
    pub state: RunState,

    /// Accepted moves, improvements included.
    pub accepted_moves: usize,

    /// Moves that strictly improved on the solution they replaced.
    pub improving_moves: usize,
}

/// A single sequential local-search run over one dataset.
///
/// Owns the current solution, its seeded random generator, and its
/// history log; independent runs are fully isolated from one another.
/// The run is driven one iteration at a time via [`step`](Self::step)
/// (synchronous, bounded cost) or to a terminal state via
/// [`run_to_completion`](Self::run_to_completion). Cancellation is
/// cooperative: the flag is read once per step boundary, so a solution is
/// never left partially mutated.
///
/// # Examples
///
/// ```
/// use clusterheur::cost::SumOfSquares;
/// use clusterheur::engine::{OptimizationRun, RunConfig, RunState};
/// use clusterheur::solution::{Dataset, Solution};
///
/// let data = Dataset::from_rows(&[
///     vec![0.0, 0.0], vec![0.0, 1.0], vec![9.0, 9.0], vec![9.0, 8.0],
/// ]).unwrap();
/// let initial = Solution::new(vec![0, 1, 0, 1], 2, &data).unwrap();
///
/// let mut run = OptimizationRun::new(initial, &data, SumOfSquares, RunConfig::default()).unwrap();
/// let report = run.run_to_completion();
/// assert_eq!(report.state, RunState::Converged);
/// ```
pub struct OptimizationRun<'a, C: CostEvaluator> {
    config: RunConfig,
    data: &'a Dataset,
    evaluator: C,
    policy: Box<dyn AcceptancePolicy>,
    cooling: Cooling,
    generator: NeighborGenerator,

    current: Solution,
    current_cost: f64,
    best: Solution,
    best_cost: f64,

    iteration: usize,
    no_improve: usize,
    accepted_moves: usize,
    improving_moves: usize,
    cost_trace: Vec<f64>,

    state: RunState,
    cancel_flag: Arc<AtomicBool>,
    rng: ChaCha8Rng,
    history: HistoryManager,
}

impl<'a, C: CostEvaluator + std::fmt::Debug> std::fmt::Debug for OptimizationRun<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimizationRun")
            .field("config", &self.config)
            .field("evaluator", &self.evaluator)
            .field("cooling", &self.cooling)
            .field("generator", &self.generator)
            .field("current_cost", &self.current_cost)
            .field("best_cost", &self.best_cost)
            .field("iteration", &self.iteration)
            .field("no_improve", &self.no_improve)
            .field("accepted_moves", &self.accepted_moves)
            .field("improving_moves", &self.improving_moves)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a, C: CostEvaluator> OptimizationRun<'a, C> {
    /// Creates a run in the `Ready` state.
    ///
    /// Validates the configuration and the initial solution against the
    /// dataset before any iteration; an invalid combination is fatal to
    /// this run only. The initial solution is recorded as the first
    /// history entry.
    pub fn new(
        initial: Solution,
        data: &'a Dataset,
        evaluator: C,
        config: RunConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if initial.num_points() != data.len() {
            return Err(ConfigError::AssignmentSizeMismatch {
                points: data.len(),
                assigned: initial.num_points(),
            });
        }
        if !config.allow_empty_clusters {
            if let Some(label) = initial.empty_cluster() {
                return Err(ConfigError::EmptyInitialCluster { label });
            }
        }

        let policy: Box<dyn AcceptancePolicy> = match config.algorithm {
            Algorithm::HillClimbing => Box::new(Greedy),
            Algorithm::SimulatedAnnealing => Box::new(Metropolis::new(config.temperature_floor)),
        };
        // Annealing draws exactly one candidate per iteration; the
        // configured sample count only applies to sampled Hill Climbing.
        let strategy = match config.algorithm {
            Algorithm::SimulatedAnnealing => NeighborStrategy::Sampled { count: 1 },
            Algorithm::HillClimbing => config.strategy,
        };
        let generator = NeighborGenerator::new(strategy, config.allow_empty_clusters);
        let cooling = Cooling::new(
            config.initial_temperature,
            config.temperature_floor,
            config.cooling,
        );
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        let current_cost = evaluator.evaluate(&initial, data);
        let mut history = HistoryManager::new();
        history.record(initial.clone());

        Ok(Self {
            config,
            data,
            evaluator,
            policy,
            cooling,
            generator,
            best: initial.clone(),
            best_cost: current_cost,
            current: initial,
            current_cost,
            iteration: 0,
            no_improve: 0,
            accepted_moves: 0,
            improving_moves: 0,
            cost_trace: vec![current_cost],
            state: RunState::Ready,
            cancel_flag: Arc::new(AtomicBool::new(false)),
            rng,
            history,
        })
    }

    /// Advances the run by exactly one iteration.
    ///
    /// Generates candidates under the configured strategy, evaluates
    /// them, selects one (the cheapest under strict `<`, so ties go to
    /// the lowest point index, then the lowest target label), applies the
    /// acceptance policy, records per the history policy, and checks the
    /// stop conditions. Returns the state after the step; calling `step`
    /// on a terminal run is a no-op.
    pub fn step(&mut self) -> RunState {
        if self.state.is_terminal() {
            return self.state;
        }
        if self.cancel_flag.load(Ordering::Relaxed) {
            self.state = RunState::StoppedByUser;
            return self.state;
        }
        self.state = RunState::Running;

        let temperature = self.cooling.temperature_at(self.iteration);
        let chosen = self.select_candidate();

        let mut new_best = false;
        if let Some((_mv, candidate, cost)) = chosen {
            let ctx = AcceptContext { temperature };
            if self
                .policy
                .decide(self.current_cost, cost, &ctx, &mut self.rng)
            {
                self.accepted_moves += 1;
                if cost < self.current_cost {
                    self.improving_moves += 1;
                }
                self.current = candidate;
                self.current_cost = cost;
                if cost < self.best_cost {
                    self.best = self.current.clone();
                    self.best_cost = cost;
                    new_best = true;
                }
                if self.config.record == RecordPolicy::AcceptedOnly {
                    self.history.record(self.current.clone());
                }
            }
        }
        if self.config.record == RecordPolicy::EveryStep {
            self.history.record(self.current.clone());
        }

        if new_best {
            self.no_improve = 0;
        } else {
            self.no_improve += 1;
        }
        self.iteration += 1;
        self.cost_trace.push(self.best_cost);

        if self
            .config
            .target_cost
            .is_some_and(|target| self.best_cost <= target)
        {
            self.state = RunState::Converged;
        } else if self.no_improve >= self.config.no_improvement_limit {
            self.state = RunState::Converged;
        } else if self.iteration >= self.config.max_iterations {
            self.state = RunState::Exhausted;
        }
        self.state
    }

    /// Scans this iteration's neighborhood and returns the cheapest
    /// scored candidate, if any legal move exists.
    fn select_candidate(&mut self) -> Option<(Move, Solution, f64)> {
        let mut chosen: Option<(Move, Solution, f64)> = None;
        for (mv, candidate) in self
            .generator
            .generate(&self.current, self.data, &mut self.rng)
        {
            let cost = self.evaluator.evaluate(&candidate, self.data);
            let better = match &chosen {
                None => true,
                Some((_, _, best_seen)) => cost < *best_seen,
            };
            if better {
                chosen = Some((mv, candidate, cost));
            }
        }
        chosen
    }

    /// Steps until a terminal state is reached and returns the final
    /// snapshot.
    pub fn run_to_completion(&mut self) -> RunSnapshot {
        while !self.state.is_terminal() {
            self.step();
        }
        self.snapshot()
    }

    /// Requests cooperative cancellation; observed at the next step
    /// boundary.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// A flag that can be handed to another thread to cancel this run.
    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_flag)
    }

    /// Read-only view of the run's best solution and counters.
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            assignment: self.best.assignment().to_vec(),
            centroids: self.best.centroids(),
            cost: self.best_cost,
            iterations: self.iteration,
            state: self.state,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Cost of the solution the search currently sits on.
    pub fn current_cost(&self) -> f64 {
        self.current_cost
    }

    /// Cost of the best solution accepted so far.
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// The solution the search currently sits on.
    pub fn current(&self) -> &Solution {
        &self.current
    }

    /// Best-cost value after each iteration, starting with the initial
    /// cost. Useful for plotting by outer layers.
    pub fn cost_trace(&self) -> &[f64] {
        &self.cost_trace
    }

    /// The undo/redo log this run appends to.
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Mutable access for driving undo/redo from a presentation layer.
    pub fn history_mut(&mut self) -> &mut HistoryManager {
        &mut self.history
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }
}
