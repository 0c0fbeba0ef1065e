//! Planning configuration.
//!
//! All parameters are explicit and defaulted: scoring weights
//! (0.5 / 0.3 / 0.2), variance bounds (±20%), allocation strategy
//! (round-robin), and no fixed seed. A TOML file may override any subset:
//!
//! ```toml
//! allocation = "top-ranked"
//!
//! [scoring]
//! oee = 0.6
//! speed = 0.3
//! reliability = 0.1
//!
//! [simulation]
//! seed = 42
//!
//! [simulation.variance]
//! min = -0.1
//! max = 0.25
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::allocation::AllocationStrategy;
use crate::error::{PlanningError, Result};
use crate::scoring::ScoringWeights;
use crate::simulation::SimulationConfig;

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanningConfig {
    /// Machine scoring weights.
    pub scoring: ScoringWeights,
    /// Order allocation strategy.
    pub allocation: AllocationStrategy,
    /// Execution simulation parameters.
    pub simulation: SimulationConfig,
}

impl PlanningConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| PlanningError::invalid(format!("malformed configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PlanningError::invalid(format!("cannot read configuration {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks weights and variance bounds.
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.simulation.variance.validate()
    }

    /// Sets the scoring weights.
    pub fn with_scoring(mut self, weights: ScoringWeights) -> Self {
        self.scoring = weights;
        self
    }

    /// Sets the allocation strategy.
    pub fn with_allocation(mut self, strategy: AllocationStrategy) -> Self {
        self.allocation = strategy;
        self
    }

    /// Sets the simulation configuration.
    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    /// Applies command-line overrides; `None` keeps the loaded value.
    pub fn with_overrides(
        mut self,
        strategy: Option<AllocationStrategy>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(strategy) = strategy {
            self.allocation = strategy;
        }
        if let Some(seed) = seed {
            self.simulation.seed = Some(seed);
        }
        self
    }
}
