//! Simulation parameters.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, Result};

/// Range of the relative run-time variance drawn per order.
///
/// A draw `v` turns `estimated_hours` into `estimated_hours * (1 + v)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VarianceBounds {
    /// Lower bound (e.g. -0.20 = up to 20% faster).
    pub min: f64,
    /// Upper bound (e.g. 0.20 = up to 20% slower).
    pub max: f64,
}

impl Default for VarianceBounds {
    fn default() -> Self {
        Self {
            min: -0.20,
            max: 0.20,
        }
    }
}

impl VarianceBounds {
    /// Creates bounds `[min, max]`.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Checks that the bounds are finite, ordered, and keep run time positive.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(PlanningError::invalid("variance bounds must be finite"));
        }
        if self.min > self.max {
            return Err(PlanningError::invalid(format!(
                "variance lower bound {} exceeds upper bound {}",
                self.min, self.max
            )));
        }
        if self.min <= -1.0 {
            return Err(PlanningError::invalid(format!(
                "variance lower bound {} would make run time non-positive",
                self.min
            )));
        }
        Ok(())
    }
}

/// Execution simulator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Variance range applied to each order.
    pub variance: VarianceBounds,
    /// Seed for reproducible runs. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Sets the variance bounds.
    pub fn with_variance(mut self, variance: VarianceBounds) -> Self {
        self.variance = variance;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Random source for a run: seeded if a seed is configured.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}
