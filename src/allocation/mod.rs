//! Order-to-machine allocation.
//!
//! Assigns each order a machine from a ranked machine list. No load,
//! capacity, or due-date awareness: orders are taken in the order the
//! caller supplies them.
//!
//! # Strategies
//!
//! | Strategy | Order `i` goes to |
//! |----------|-------------------|
//! | `RoundRobin` | `ranked[i mod N]` |
//! | `TopRanked` | `ranked[0]` |

use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, Result};
use crate::models::{Allocation, Order, ScoredMachine};

/// How orders are spread over the ranked machines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationStrategy {
    /// Cycle through machines in rank order.
    #[default]
    RoundRobin,
    /// Send every order to the best-ranked machine.
    TopRanked,
}

/// Assigns orders to ranked machines.
///
/// # Example
///
/// ```
/// use smart_planning::allocation::OrderAllocator;
/// use smart_planning::models::{Machine, Order};
/// use smart_planning::scoring::MachineScorer;
///
/// let machines = vec![
///     Machine::new("M1").with_oee(0.9).with_speed(100.0).with_reliability(0.9),
///     Machine::new("M2").with_oee(0.8).with_speed(100.0).with_reliability(0.9),
/// ];
/// let ranked = MachineScorer::default().score(&machines);
/// let orders = vec![Order::new("OP1", 10.0), Order::new("OP2", 20.0), Order::new("OP3", 5.0)];
///
/// let allocations = OrderAllocator::new().allocate(&orders, &ranked).unwrap();
/// let machines: Vec<_> = allocations.iter().map(|a| a.assigned_machine.as_str()).collect();
/// assert_eq!(machines, vec!["M1", "M2", "M1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderAllocator {
    strategy: AllocationStrategy,
}

impl OrderAllocator {
    /// Creates a round-robin allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the allocation strategy.
    pub fn with_strategy(mut self, strategy: AllocationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Strategy in use.
    pub fn strategy(&self) -> AllocationStrategy {
        self.strategy
    }

    /// Allocates every order to exactly one ranked machine.
    ///
    /// Inputs are left untouched; the result preserves order sequence.
    ///
    /// # Errors
    /// `InvalidInput` if `ranked_machines` is empty.
    pub fn allocate(
        &self,
        orders: &[Order],
        ranked_machines: &[ScoredMachine],
    ) -> Result<Vec<Allocation>> {
        if ranked_machines.is_empty() {
            return Err(PlanningError::invalid(format!(
                "cannot allocate {} order(s): no machines available",
                orders.len()
            )));
        }

        let n = ranked_machines.len();
        let allocations = orders
            .iter()
            .enumerate()
            .map(|(i, order)| {
                let slot = match self.strategy {
                    AllocationStrategy::RoundRobin => i % n,
                    AllocationStrategy::TopRanked => 0,
                };
                Allocation::new(order.clone(), ranked_machines[slot].machine_id())
            })
            .collect();

        Ok(allocations)
    }
}
