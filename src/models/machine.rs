//! Machine (work center) master data.
//!
//! Machines carry the three performance indicators used for ranking:
//! historical OEE, average speed, and reliability. Indicator cells that
//! were blank or non-numeric at ingestion are kept as `None`; the scorer
//! reads them as `0.0`.

use serde::{Deserialize, Serialize};

/// A machine that can execute production orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// Unique machine (work center) identifier.
    pub machine_id: String,
    /// Human-readable description.
    pub description: String,
    /// Theoretical capacity as reported by the source system.
    pub theoretical_capacity: Option<f64>,
    /// Historical OEE, fraction (0..1) or percentage (0..100).
    pub historical_oee: Option<f64>,
    /// Average speed in units per hour. Must be > 0 to receive orders.
    pub average_speed: Option<f64>,
    /// Reliability, fraction (0..1) or percentage (0..100).
    pub reliability: Option<f64>,
}

/// The three ranking indicators of a machine, coerced to numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicators {
    /// Historical OEE.
    pub oee: f64,
    /// Average speed.
    pub speed: f64,
    /// Reliability.
    pub reliability: f64,
}

impl Machine {
    /// Creates a machine with the given id and no indicators.
    pub fn new(machine_id: impl Into<String>) -> Self {
        Self {
            machine_id: machine_id.into(),
            description: String::new(),
            theoretical_capacity: None,
            historical_oee: None,
            average_speed: None,
            reliability: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the theoretical capacity.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.theoretical_capacity = Some(capacity);
        self
    }

    /// Sets the historical OEE.
    pub fn with_oee(mut self, oee: f64) -> Self {
        self.historical_oee = Some(oee);
        self
    }

    /// Sets the average speed (units per hour).
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.average_speed = Some(speed);
        self
    }

    /// Sets the reliability.
    pub fn with_reliability(mut self, reliability: f64) -> Self {
        self.reliability = Some(reliability);
        self
    }

    /// Indicators with blank or non-finite values replaced by `0.0`.
    pub fn indicators(&self) -> Indicators {
        Indicators {
            oee: coerce(self.historical_oee),
            speed: coerce(self.average_speed),
            reliability: coerce(self.reliability),
        }
    }

    /// Average speed as used for run-time estimation (`0.0` when blank).
    pub fn speed(&self) -> f64 {
        coerce(self.average_speed)
    }
}

fn coerce(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
