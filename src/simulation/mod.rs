//! Execution simulation.
//!
//! Projects how long each allocated order takes on its machine and how
//! far a randomized "real" run drifts from the estimate.
//!
//! # Per-order projection
//!
//! ```text
//! estimated_hours   = qty / average_speed
//! actual_hours      = estimated_hours * (1 + v),  v ~ U[min, max]
//! deviation_percent = v * 100
//! status            = Gain if deviation < 0, Loss if > 0, else Neutral
//! ```
//!
//! # Batch semantics
//!
//! [`ExecutionSimulator::simulate`] stops at the first order whose machine
//! is unknown or has a non-positive speed. [`ExecutionSimulator::simulate_best_effort`]
//! skips such orders and reports them alongside the successful results.
//!
//! The random source is passed in by the caller; a seeded generator
//! makes runs reproducible.

mod config;
mod summary;

pub use config::{SimulationConfig, VarianceBounds};
pub use summary::SimulationSummary;

use std::collections::HashMap;

use rand::Rng;

use crate::error::{PlanningError, Result};
use crate::models::{Allocation, Machine, SimulationResult, SimulationStatus};

/// Results of a best-effort simulation run.
#[derive(Debug, Clone, Default)]
pub struct SimulationOutcome {
    /// Orders simulated successfully, in input order.
    pub results: Vec<SimulationResult>,
    /// Orders that could not be simulated, in input order.
    pub failures: Vec<PlanningError>,
}

impl SimulationOutcome {
    /// Whether every order was simulated.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Simulates execution of allocated orders.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use smart_planning::models::{Allocation, Machine, Order};
/// use smart_planning::simulation::ExecutionSimulator;
///
/// let machines = vec![Machine::new("CT01").with_speed(50.0)];
/// let allocations = vec![Allocation::new(Order::new("OP1", 100.0), "CT01")];
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let results = ExecutionSimulator::default()
///     .simulate(&allocations, &machines, &mut rng)
///     .unwrap();
/// assert_eq!(results[0].estimated_hours, 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExecutionSimulator {
    config: SimulationConfig,
}

impl ExecutionSimulator {
    /// Creates a simulator with the given configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulates every allocation, stopping at the first failure.
    ///
    /// Draws exactly one variate per order, in input order.
    ///
    /// # Errors
    /// - `Lookup` if an allocation names a machine absent from `machines`.
    /// - `InvalidSpeed` if the machine's average speed is not positive.
    /// - `InvalidInput` if the configured variance bounds are invalid.
    pub fn simulate<R: Rng>(
        &self,
        allocations: &[Allocation],
        machines: &[Machine],
        rng: &mut R,
    ) -> Result<Vec<SimulationResult>> {
        self.config.variance.validate()?;
        let index = machine_index(machines);

        allocations
            .iter()
            .map(|alloc| {
                let machine = lookup(&index, alloc)?;
                let v = self.draw(rng);
                Self::project(alloc, machine, v)
            })
            .collect()
    }

    /// Simulates every allocation, collecting failures instead of stopping.
    ///
    /// A variate is drawn only for orders whose machine resolves.
    ///
    /// # Errors
    /// `InvalidInput` if the configured variance bounds are invalid.
    pub fn simulate_best_effort<R: Rng>(
        &self,
        allocations: &[Allocation],
        machines: &[Machine],
        rng: &mut R,
    ) -> Result<SimulationOutcome> {
        self.config.variance.validate()?;
        let index = machine_index(machines);
        let mut outcome = SimulationOutcome::default();

        for alloc in allocations {
            let projected = lookup(&index, alloc).and_then(|machine| {
                let v = self.draw(rng);
                Self::project(alloc, machine, v)
            });
            match projected {
                Ok(result) => outcome.results.push(result),
                Err(err) => outcome.failures.push(err),
            }
        }

        Ok(outcome)
    }

    /// Projects one order on its machine for a given variate `v`.
    ///
    /// # Errors
    /// `InvalidSpeed` if the machine's average speed is not positive.
    pub fn project(alloc: &Allocation, machine: &Machine, v: f64) -> Result<SimulationResult> {
        let speed = machine.speed();
        if speed <= 0.0 {
            return Err(PlanningError::InvalidSpeed {
                order_id: alloc.order_id().to_string(),
                machine_id: machine.machine_id.clone(),
                speed,
            });
        }

        let estimated_hours = alloc.order.qty / speed;
        let actual_hours = estimated_hours * (1.0 + v);
        let deviation_percent = v * 100.0;

        Ok(SimulationResult {
            order_id: alloc.order_id().to_string(),
            machine: machine.machine_id.clone(),
            qty: alloc.order.qty,
            estimated_hours,
            actual_hours,
            deviation_percent,
            status: SimulationStatus::from_deviation(deviation_percent),
        })
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        let VarianceBounds { min, max } = self.config.variance;
        rng.random_range(min..=max)
    }
}

/// Machine id → machine; the first occurrence of a duplicated id wins.
fn machine_index(machines: &[Machine]) -> HashMap<&str, &Machine> {
    let mut index = HashMap::with_capacity(machines.len());
    for m in machines {
        index.entry(m.machine_id.as_str()).or_insert(m);
    }
    index
}

fn lookup<'a>(index: &HashMap<&str, &'a Machine>, alloc: &Allocation) -> Result<&'a Machine> {
    index
        .get(alloc.assigned_machine.as_str())
        .copied()
        .ok_or_else(|| PlanningError::Lookup {
            order_id: alloc.order_id().to_string(),
            machine_id: alloc.assigned_machine.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::Order;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_machines() -> Vec<Machine> {
        vec![
            Machine::new("CT01").with_speed(50.0),
            Machine::new("CT02").with_speed(120.0),
            Machine::new("CT03").with_speed(80.0),
        ]
    }

    fn sample_allocations() -> Vec<Allocation> {
        vec![
            Allocation::new(Order::new("OP1", 100.0), "CT01"),
            Allocation::new(Order::new("OP2", 600.0), "CT02"),
            Allocation::new(Order::new("OP3", 40.0), "CT03"),
            Allocation::new(Order::new("OP4", 75.0), "CT01"),
        ]
    }

    #[test]
    fn test_project_reference_case() {
        let alloc = Allocation::new(Order::new("OP1", 100.0), "CT01");
        let machine = Machine::new("CT01").with_speed(50.0);

        let result = ExecutionSimulator::project(&alloc, &machine, 0.10).unwrap();
        assert!((result.estimated_hours - 2.0).abs() < 1e-12);
        assert!((result.actual_hours - 2.2).abs() < 1e-12);
        assert!((result.deviation_percent - 10.0).abs() < 1e-12);
        assert_eq!(result.status, SimulationStatus::Loss);

        let display = result.rounded();
        assert_eq!(display.estimated_hours, 2.0);
        assert_eq!(display.actual_hours, 2.2);
        assert_eq!(display.deviation_percent, 10.0);
    }

    #[test]
    fn test_project_gain_and_neutral() {
        let alloc = Allocation::new(Order::new("OP1", 30.0), "M");
        let machine = Machine::new("M").with_speed(10.0);

        let gain = ExecutionSimulator::project(&alloc, &machine, -0.05).unwrap();
        assert_eq!(gain.status, SimulationStatus::Gain);
        assert!(gain.actual_hours < gain.estimated_hours);

        let neutral = ExecutionSimulator::project(&alloc, &machine, 0.0).unwrap();
        assert_eq!(neutral.status, SimulationStatus::Neutral);
        assert_eq!(neutral.actual_hours, neutral.estimated_hours);
    }

    #[test]
    fn test_zero_quantity_status_follows_variate() {
        let alloc = Allocation::new(Order::new("OP0", 0.0), "M");
        let machine = Machine::new("M").with_speed(10.0);

        // Zero hours either way; the drawn variance still classifies the run.
        let loss = ExecutionSimulator::project(&alloc, &machine, 0.15).unwrap();
        assert_eq!(loss.estimated_hours, 0.0);
        assert_eq!(loss.actual_hours, 0.0);
        assert!((loss.deviation_percent - 15.0).abs() < 1e-12);
        assert_eq!(loss.status, SimulationStatus::Loss);

        let gain = ExecutionSimulator::project(&alloc, &machine, -0.15).unwrap();
        assert_eq!(gain.actual_hours, 0.0);
        assert_eq!(gain.status, SimulationStatus::Gain);

        let neutral = ExecutionSimulator::project(&alloc, &machine, 0.0).unwrap();
        assert_eq!(neutral.status, SimulationStatus::Neutral);
    }

    #[test]
    fn test_simulate_properties() {
        let machines = sample_machines();
        let allocations = sample_allocations();
        let mut rng = StdRng::seed_from_u64(2024);

        let results = ExecutionSimulator::default()
            .simulate(&allocations, &machines, &mut rng)
            .unwrap();

        assert_eq!(results.len(), allocations.len());
        for (alloc, result) in allocations.iter().zip(&results) {
            let machine = machines
                .iter()
                .find(|m| m.machine_id == alloc.assigned_machine)
                .unwrap();
            assert_eq!(result.order_id, alloc.order.order_id);
            assert_eq!(result.machine, alloc.assigned_machine);
            assert_eq!(result.estimated_hours, alloc.order.qty / machine.speed());
            assert!(result.actual_hours >= result.estimated_hours * 0.8 - 1e-12);
            assert!(result.actual_hours <= result.estimated_hours * 1.2 + 1e-12);

            let relative = (result.actual_hours - result.estimated_hours)
                / result.estimated_hours
                * 100.0;
            assert!((relative - result.deviation_percent).abs() < 1e-9);

            let expected = if result.actual_hours < result.estimated_hours {
                SimulationStatus::Gain
            } else if result.actual_hours > result.estimated_hours {
                SimulationStatus::Loss
            } else {
                SimulationStatus::Neutral
            };
            assert_eq!(result.status, expected);
        }
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let machines = sample_machines();
        let allocations = sample_allocations();
        let sim = ExecutionSimulator::default();

        let a = sim
            .simulate(&allocations, &machines, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = sim
            .simulate(&allocations, &machines, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_variance_bounds() {
        let sim = ExecutionSimulator::new(
            SimulationConfig::default().with_variance(VarianceBounds::new(0.05, 0.10)),
        );
        let mut rng = StdRng::seed_from_u64(1);
        let results = sim
            .simulate(&sample_allocations(), &sample_machines(), &mut rng)
            .unwrap();
        for r in &results {
            assert!(r.deviation_percent >= 5.0 - 1e-9 && r.deviation_percent <= 10.0 + 1e-9);
            assert_eq!(r.status, SimulationStatus::Loss);
        }
    }

    #[test]
    fn test_unknown_machine_stops() {
        let mut allocations = sample_allocations();
        allocations.insert(1, Allocation::new(Order::new("OPX", 10.0), "CT99"));
        let mut rng = StdRng::seed_from_u64(3);

        let err = ExecutionSimulator::default()
            .simulate(&allocations, &sample_machines(), &mut rng)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert_eq!(
            err,
            PlanningError::Lookup {
                order_id: "OPX".into(),
                machine_id: "CT99".into(),
            }
        );
    }

    #[test]
    fn test_non_positive_speed_fails() {
        let machines = vec![Machine::new("SLOW").with_speed(0.0), Machine::new("NONE")];
        let mut rng = StdRng::seed_from_u64(3);

        for id in ["SLOW", "NONE"] {
            let allocations = vec![Allocation::new(Order::new("OP1", 10.0), id)];
            let err = ExecutionSimulator::default()
                .simulate(&allocations, &machines, &mut rng)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
            assert!(matches!(err, PlanningError::InvalidSpeed { .. }));
        }
    }

    #[test]
    fn test_best_effort_collects_failures() {
        let mut allocations = sample_allocations();
        allocations.push(Allocation::new(Order::new("OP5", 1.0), "GHOST"));
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = ExecutionSimulator::default()
            .simulate_best_effort(&allocations, &sample_machines(), &mut rng)
            .unwrap();
        assert!(!outcome.is_complete());
        assert_eq!(outcome.results.len(), 4);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].kind(), ErrorKind::Lookup);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let sim = ExecutionSimulator::new(
            SimulationConfig::default().with_variance(VarianceBounds::new(0.2, -0.2)),
        );
        let mut rng = StdRng::seed_from_u64(0);
        let err = sim
            .simulate(&sample_allocations(), &sample_machines(), &mut rng)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_empty_batch() {
        let mut rng = StdRng::seed_from_u64(0);
        let results = ExecutionSimulator::default()
            .simulate(&[], &[], &mut rng)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_duplicate_machine_first_wins() {
        let machines = vec![
            Machine::new("CT01").with_speed(50.0),
            Machine::new("CT01").with_speed(10.0),
        ];
        let alloc = vec![Allocation::new(Order::new("OP1", 100.0), "CT01")];
        let mut rng = StdRng::seed_from_u64(0);
        let results = ExecutionSimulator::default()
            .simulate(&alloc, &machines, &mut rng)
            .unwrap();
        assert_eq!(results[0].estimated_hours, 2.0);
    }
}
