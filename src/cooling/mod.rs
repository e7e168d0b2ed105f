//! Cooling schedules for Simulated Annealing.
//!
//! A schedule is pure: temperature is a function of the iteration count
//! alone, never of search history, so a run can be replayed exactly.
//!
//! # References
//!
//! - Geometric/exponential decay: standard textbook approach
//! - Logarithmic decay: Geman & Geman (1984)

/// Temperature decay rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Exponential decay: `T = T0 * alpha^iteration`.
    ///
    /// Most widely used. Typical `alpha`: 0.95-0.99.
    Exponential {
        /// Decay factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear decay: `T = max(floor, T0 - iteration * step)`.
    Linear {
        /// Temperature removed per iteration. Must be positive.
        step: f64,
    },

    /// Logarithmic decay: `T = T0 / ln(iteration + 2)`.
    ///
    /// Cools very slowly; mostly of theoretical interest.
    Logarithmic,
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Exponential { alpha: 0.95 }
    }
}

/// A schedule bound to an initial temperature and a positive floor.
///
/// The floor keeps the temperature strictly positive for the whole run;
/// once a schedule would drop below it, [`Cooling::temperature_at`]
/// returns the floor itself, at which point Metropolis acceptance
/// degrades to pure greedy behavior.
#[derive(Debug, Clone, Copy)]
pub struct Cooling {
    initial: f64,
    floor: f64,
    schedule: CoolingSchedule,
}

impl Cooling {
    pub fn new(initial: f64, floor: f64, schedule: CoolingSchedule) -> Self {
        Self {
            initial,
            floor,
            schedule,
        }
    }

    /// Temperature at a given iteration. Monotonically non-increasing in
    /// `iteration` and always `>= floor > 0`.
    pub fn temperature_at(&self, iteration: usize) -> f64 {
        let t = match self.schedule {
            CoolingSchedule::Exponential { alpha } => {
                self.initial * alpha.powf(iteration as f64)
            }
            CoolingSchedule::Linear { step } => self.initial - step * iteration as f64,
            CoolingSchedule::Logarithmic => self.initial / (iteration as f64 + 2.0).ln(),
        };
        t.max(self.floor)
    }

    /// The configured floor.
    pub fn floor(&self) -> f64 {
        self.floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_non_increasing(cooling: &Cooling) {
        let mut previous = f64::INFINITY;
        for iteration in 0..500 {
            let t = cooling.temperature_at(iteration);
            assert!(
                t <= previous,
                "temperature rose at iteration {iteration}: {previous} -> {t}"
            );
            assert!(t >= cooling.floor(), "temperature fell below floor: {t}");
            previous = t;
        }
    }

    #[test]
    fn test_exponential_decay() {
        let cooling = Cooling::new(100.0, 1e-6, CoolingSchedule::Exponential { alpha: 0.9 });
        assert_eq!(cooling.temperature_at(0), 100.0);
        assert!((cooling.temperature_at(1) - 90.0).abs() < 1e-9);
        assert!((cooling.temperature_at(2) - 81.0).abs() < 1e-9);
        assert_non_increasing(&cooling);
    }

    #[test]
    fn test_linear_decay_clamps_at_floor() {
        let cooling = Cooling::new(10.0, 0.5, CoolingSchedule::Linear { step: 1.0 });
        assert_eq!(cooling.temperature_at(0), 10.0);
        assert_eq!(cooling.temperature_at(5), 5.0);
        assert_eq!(cooling.temperature_at(10), 0.5);
        assert_eq!(cooling.temperature_at(1000), 0.5);
        assert_non_increasing(&cooling);
    }

    #[test]
    fn test_logarithmic_decay() {
        let cooling = Cooling::new(100.0, 1e-6, CoolingSchedule::Logarithmic);
        assert!((cooling.temperature_at(0) - 100.0 / 2.0_f64.ln()).abs() < 1e-9);
        assert_non_increasing(&cooling);
    }

    #[test]
    fn test_exponential_reaches_floor_eventually() {
        let cooling = Cooling::new(100.0, 0.01, CoolingSchedule::Exponential { alpha: 0.5 });
        assert_eq!(cooling.temperature_at(100), 0.01);
    }

    #[test]
    fn test_schedule_is_pure() {
        let cooling = Cooling::new(50.0, 1e-3, CoolingSchedule::Exponential { alpha: 0.99 });
        // Querying out of order changes nothing.
        let late = cooling.temperature_at(200);
        let early = cooling.temperature_at(10);
        assert_eq!(cooling.temperature_at(200), late);
        assert_eq!(cooling.temperature_at(10), early);
    }
}
