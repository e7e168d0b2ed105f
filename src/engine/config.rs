//! Run configuration and validation.

use crate::cooling::CoolingSchedule;
use crate::neighbor::NeighborStrategy;
use thiserror::Error;

/// Which local-search algorithm drives the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Steepest-descent Hill Climbing: scan the neighborhood, take the
    /// best candidate, accept only strict improvement.
    HillClimbing,

    /// Simulated Annealing with Metropolis acceptance: one sampled
    /// candidate per iteration, worsening moves accepted with a
    /// temperature-dependent probability.
    SimulatedAnnealing,
}

/// What the run appends to its history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordPolicy {
    /// Record only accepted solutions. Rejected candidates never flood
    /// the undo log.
    AcceptedOnly,

    /// Record the current solution after every iteration, accepted or
    /// not.
    EveryStep,
}

/// Invalid parameter combinations, surfaced before a run starts.
///
/// Fatal to the run being configured, and to nothing else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_iterations must be positive")]
    ZeroMaxIterations,

    #[error("no_improvement_limit must be positive")]
    ZeroNoImprovementLimit,

    #[error("target_cost must be non-negative, got {0}")]
    NegativeTargetCost(f64),

    #[error("initial_temperature must be positive, got {0}")]
    NonPositiveTemperature(f64),

    #[error("temperature_floor must be positive, got {0}")]
    NonPositiveFloor(f64),

    #[error("temperature_floor {floor} must be below initial_temperature {initial}")]
    FloorAboveInitial { floor: f64, initial: f64 },

    #[error("exponential alpha must be in (0, 1), got {0}")]
    AlphaOutOfRange(f64),

    #[error("linear cooling step must be positive, got {0}")]
    NonPositiveStep(f64),

    #[error("sampled neighborhood count must be positive")]
    ZeroSampleCount,

    #[error("simulated annealing requires the Sampled neighbor strategy")]
    AnnealingRequiresSampling,

    #[error("assignment covers {assigned} points, dataset has {points}")]
    AssignmentSizeMismatch { points: usize, assigned: usize },

    #[error("initial solution leaves cluster {label} empty, which the policy forbids")]
    EmptyInitialCluster { label: usize },
}

/// Configuration for one optimization run.
///
/// # Examples
///
/// ```
/// use clusterheur::cooling::CoolingSchedule;
/// use clusterheur::engine::{Algorithm, RunConfig};
///
/// let config = RunConfig::default()
///     .with_algorithm(Algorithm::SimulatedAnnealing)
///     .with_initial_temperature(50.0)
///     .with_cooling(CoolingSchedule::Exponential { alpha: 0.98 })
///     .with_max_iterations(5000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// The algorithm driving the run.
    pub algorithm: Algorithm,

    /// Neighborhood exploration strategy.
    ///
    /// Simulated Annealing always samples and draws exactly one candidate
    /// per iteration regardless of the configured count.
    pub strategy: NeighborStrategy,

    /// Hard iteration budget. The run reports `Exhausted` on reaching it.
    pub max_iterations: usize,

    /// Consecutive iterations without a new best solution before the run
    /// reports `Converged`.
    pub no_improvement_limit: usize,

    /// Optional cost target; reaching it reports `Converged`.
    pub target_cost: Option<f64>,

    /// Starting temperature for Simulated Annealing.
    pub initial_temperature: f64,

    /// Cooling schedule for Simulated Annealing.
    pub cooling: CoolingSchedule,

    /// Strictly positive lower bound on the temperature. At or below it,
    /// acceptance is pure greedy.
    pub temperature_floor: f64,

    /// Seed for the run-owned random generator.
    pub seed: u64,

    /// Whether moves may empty a cluster.
    pub allow_empty_clusters: bool,

    /// History recording policy.
    pub record: RecordPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HillClimbing,
            strategy: NeighborStrategy::Exhaustive,
            max_iterations: 1000,
            no_improvement_limit: 50,
            target_cost: None,
            initial_temperature: 100.0,
            cooling: CoolingSchedule::default(),
            temperature_floor: 1e-6,
            seed: 42,
            allow_empty_clusters: false,
            record: RecordPolicy::AcceptedOnly,
        }
    }
}

impl RunConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        // Annealing only ever samples; switch over unless the caller
        // already picked a sampled strategy.
        if algorithm == Algorithm::SimulatedAnnealing
            && self.strategy == NeighborStrategy::Exhaustive
        {
            self.strategy = NeighborStrategy::Sampled { count: 1 };
        }
        self
    }

    pub fn with_strategy(mut self, strategy: NeighborStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_no_improvement_limit(mut self, n: usize) -> Self {
        self.no_improvement_limit = n;
        self
    }

    pub fn with_target_cost(mut self, target: f64) -> Self {
        self.target_cost = Some(target);
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_temperature_floor(mut self, floor: f64) -> Self {
        self.temperature_floor = floor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_allow_empty_clusters(mut self, allow: bool) -> Self {
        self.allow_empty_clusters = allow;
        self
    }

    pub fn with_record(mut self, record: RecordPolicy) -> Self {
        self.record = record;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroMaxIterations);
        }
        if self.no_improvement_limit == 0 {
            return Err(ConfigError::ZeroNoImprovementLimit);
        }
        if let Some(target) = self.target_cost {
            if target < 0.0 {
                return Err(ConfigError::NegativeTargetCost(target));
            }
        }
        if self.initial_temperature <= 0.0 {
            return Err(ConfigError::NonPositiveTemperature(self.initial_temperature));
        }
        if self.temperature_floor <= 0.0 {
            return Err(ConfigError::NonPositiveFloor(self.temperature_floor));
        }
        if self.temperature_floor >= self.initial_temperature {
            return Err(ConfigError::FloorAboveInitial {
                floor: self.temperature_floor,
                initial: self.initial_temperature,
            });
        }
        match self.cooling {
            CoolingSchedule::Exponential { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(ConfigError::AlphaOutOfRange(alpha));
                }
            }
            CoolingSchedule::Linear { step } => {
                if step <= 0.0 {
                    return Err(ConfigError::NonPositiveStep(step));
                }
            }
            CoolingSchedule::Logarithmic => {}
        }
        if let NeighborStrategy::Sampled { count } = self.strategy {
            if count == 0 {
                return Err(ConfigError::ZeroSampleCount);
            }
        }
        if self.algorithm == Algorithm::SimulatedAnnealing
            && self.strategy == NeighborStrategy::Exhaustive
        {
            return Err(ConfigError::AnnealingRequiresSampling);
        }
        Ok(())
    }
}
