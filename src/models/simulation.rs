//! Simulated execution records.
//!
//! Results keep unrounded values so callers can aggregate them.
//! Rounding to display precision happens in [`SimulationResult::rounded`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a simulated order relative to its estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationStatus {
    /// Finished faster than estimated.
    Gain,
    /// Finished slower than estimated.
    Loss,
    /// Finished exactly as estimated.
    Neutral,
}

impl SimulationStatus {
    /// Classifies a signed deviation percentage.
    pub fn from_deviation(deviation_percent: f64) -> Self {
        if deviation_percent < 0.0 {
            Self::Gain
        } else if deviation_percent > 0.0 {
            Self::Loss
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Gain => "Gain",
            Self::Loss => "Loss",
            Self::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

/// Simulated execution of one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Order id.
    pub order_id: String,
    /// Machine the order ran on.
    pub machine: String,
    /// Order quantity.
    pub qty: f64,
    /// `qty / average_speed`.
    pub estimated_hours: f64,
    /// Estimated hours with the drawn variance applied.
    pub actual_hours: f64,
    /// Signed deviation of actual from estimated, in percent.
    pub deviation_percent: f64,
    /// Gain / Loss / Neutral classification of the deviation.
    pub status: SimulationStatus,
}

impl SimulationResult {
    /// Copy rounded to display precision: hours to 2 decimals,
    /// deviation to 1 decimal.
    pub fn rounded(&self) -> Self {
        Self {
            order_id: self.order_id.clone(),
            machine: self.machine.clone(),
            qty: self.qty,
            estimated_hours: round_to(self.estimated_hours, 2),
            actual_hours: round_to(self.actual_hours, 2),
            deviation_percent: round_to(self.deviation_percent, 1),
            status: self.status,
        }
    }
}

/// Rounds half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
