//! End-to-end planning pipeline.
//!
//! Chains the three stages over one batch:
//!
//! ```text
//! validate_input ─▶ MachineScorer ─▶ OrderAllocator ─▶ ExecutionSimulator
//!                      (ranking)       (allocations)      (results)
//! ```
//!
//! [`Planner::plan`] stops after allocation; [`Planner::run`] also
//! simulates. Stage outcomes are logged with `tracing`; the stages
//! themselves stay silent.

mod overview;

pub use overview::PlanOverview;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::allocation::OrderAllocator;
use crate::config::PlanningConfig;
use crate::error::{PlanningError, Result};
use crate::models::{
    load_by_machine, Allocation, Machine, MachineLoad, Order, ScoredMachine, SimulationResult,
};
use crate::scoring::MachineScorer;
use crate::simulation::{ExecutionSimulator, SimulationSummary};
use crate::validation::validate_input;

/// Scored and allocated batch, before simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    /// Batch headline numbers.
    pub overview: PlanOverview,
    /// Machines, best first.
    pub ranking: Vec<ScoredMachine>,
    /// One allocation per order, in order input order.
    pub allocations: Vec<Allocation>,
    /// Orders and quantity per machine.
    pub loads: Vec<MachineLoad>,
}

/// Complete output of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    /// Batch headline numbers.
    pub overview: PlanOverview,
    /// Machines, best first.
    pub ranking: Vec<ScoredMachine>,
    /// One allocation per order.
    pub allocations: Vec<Allocation>,
    /// Orders and quantity per machine.
    pub loads: Vec<MachineLoad>,
    /// Simulated orders, unrounded.
    pub simulation: Vec<SimulationResult>,
    /// Orders skipped in a best-effort run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<PlanningError>,
    /// Aggregates over `simulation`.
    pub summary: SimulationSummary,
}

/// Runs the scoring, allocation, and simulation stages with one configuration.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use smart_planning::models::{Machine, Order};
/// use smart_planning::pipeline::Planner;
///
/// let machines = vec![
///     Machine::new("CT01").with_oee(0.85).with_speed(100.0).with_reliability(0.90),
///     Machine::new("CT02").with_oee(0.92).with_speed(95.0).with_reliability(0.80),
/// ];
/// let orders = vec![Order::new("OP1", 120.0), Order::new("OP2", 80.0)];
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let report = Planner::default().run(&orders, &machines, &mut rng).unwrap();
/// assert_eq!(report.simulation.len(), 2);
/// assert_eq!(report.summary.order_count, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlanningConfig,
}

impl Planner {
    /// Creates a planner with the given configuration.
    pub fn new(config: PlanningConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// Validates, scores, and allocates a batch.
    ///
    /// # Errors
    /// - `InvalidInput` if the batch fails validation (every problem is
    ///   listed in the message), the configuration is invalid, or there are
    ///   no machines.
    pub fn plan(&self, orders: &[Order], machines: &[Machine]) -> Result<Plan> {
        self.config.validate()?;
        if let Err(errors) = validate_input(orders, machines) {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(PlanningError::invalid(messages.join("; ")));
        }

        let overview = PlanOverview::calculate(orders, machines);
        debug!(
            orders = overview.total_orders,
            machines = overview.machine_count,
            total_qty = overview.total_qty,
            "batch accepted"
        );

        let ranking = MachineScorer::new(self.config.scoring).score(machines);
        if let Some(best) = ranking.first() {
            info!(
                machines = ranking.len(),
                best = best.machine_id(),
                score = best.score,
                "machines ranked"
            );
        }

        let allocations = OrderAllocator::new()
            .with_strategy(self.config.allocation)
            .allocate(orders, &ranking)?;
        let loads = load_by_machine(&allocations);
        info!(
            orders = allocations.len(),
            machines_used = loads.len(),
            strategy = ?self.config.allocation,
            "orders allocated"
        );

        Ok(Plan {
            overview,
            ranking,
            allocations,
            loads,
        })
    }

    /// Plans and simulates a batch, stopping at the first simulation error.
    ///
    /// # Errors
    /// Everything [`Planner::plan`] reports, plus `InvalidSpeed` when a
    /// machine receiving orders has no positive average speed.
    pub fn run<R: Rng>(
        &self,
        orders: &[Order],
        machines: &[Machine],
        rng: &mut R,
    ) -> Result<PlanReport> {
        let plan = self.plan(orders, machines)?;
        let simulation = self.simulator().simulate(&plan.allocations, machines, rng)?;
        Ok(Self::report(plan, simulation, Vec::new()))
    }

    /// Plans and simulates a batch, skipping orders that cannot be simulated.
    ///
    /// Skipped orders are listed in [`PlanReport::failures`].
    pub fn run_best_effort<R: Rng>(
        &self,
        orders: &[Order],
        machines: &[Machine],
        rng: &mut R,
    ) -> Result<PlanReport> {
        let plan = self.plan(orders, machines)?;
        let outcome = self
            .simulator()
            .simulate_best_effort(&plan.allocations, machines, rng)?;

        if !outcome.is_complete() {
            warn!(skipped = outcome.failures.len(), "some orders could not be simulated");
        }
        for failure in &outcome.failures {
            debug!(error = %failure, "order skipped");
        }
        Ok(Self::report(plan, outcome.results, outcome.failures))
    }

    /// Runs with the configured seed, or an unseeded generator without one.
    pub fn run_seeded(&self, orders: &[Order], machines: &[Machine]) -> Result<PlanReport> {
        let mut rng = self.config.simulation.rng();
        self.run(orders, machines, &mut rng)
    }

    fn simulator(&self) -> ExecutionSimulator {
        ExecutionSimulator::new(self.config.simulation.clone())
    }

    fn report(
        plan: Plan,
        simulation: Vec<SimulationResult>,
        failures: Vec<PlanningError>,
    ) -> PlanReport {
        let summary = SimulationSummary::calculate(&simulation);
        info!(
            simulated = summary.order_count,
            skipped = failures.len(),
            mean_deviation = summary.mean_deviation_percent,
            overall = %summary.overall,
            "simulation finished"
        );

        PlanReport {
            overview: plan.overview,
            ranking: plan.ranking,
            allocations: plan.allocations,
            loads: plan.loads,
            simulation,
            failures,
            summary,
        }
    }
}
