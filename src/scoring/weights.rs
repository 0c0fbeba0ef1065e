//! Scoring weights.

use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, Result};

/// Weights of the three normalized indicators in the machine score.
///
/// With weights summing to 1.0, every score lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringWeights {
    /// Weight of normalized historical OEE.
    pub oee: f64,
    /// Weight of normalized average speed.
    pub speed: f64,
    /// Weight of normalized reliability.
    pub reliability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            oee: 0.5,
            speed: 0.3,
            reliability: 0.2,
        }
    }
}

impl ScoringWeights {
    /// Creates a weight set.
    pub fn new(oee: f64, speed: f64, reliability: f64) -> Self {
        Self {
            oee,
            speed,
            reliability,
        }
    }

    /// Sum of all weights (upper bound of any score).
    pub fn total(&self) -> f64 {
        self.oee + self.speed + self.reliability
    }

    /// Checks that all weights are finite and non-negative with a positive sum.
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("oee", self.oee),
            ("speed", self.speed),
            ("reliability", self.reliability),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(PlanningError::invalid(format!(
                    "scoring weight '{name}' must be a finite non-negative number, got {w}"
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(PlanningError::invalid("scoring weights must not all be zero"));
        }
        Ok(())
    }
}
