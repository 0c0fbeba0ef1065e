//! Order-to-machine allocation and ranked machines.

use serde::{Deserialize, Serialize};

use super::{Machine, Order};

/// A machine with its derived performance score.
///
/// The rank is 1-based: rank 1 is the best machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMachine {
    /// Master data, unchanged by scoring.
    pub machine: Machine,
    /// Weighted score (higher is better).
    pub score: f64,
    /// Position after sorting by descending score (1-based).
    pub rank: usize,
}

impl ScoredMachine {
    /// Machine identifier.
    #[inline]
    pub fn machine_id(&self) -> &str {
        &self.machine.machine_id
    }
}

/// An order together with the machine it was assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// The allocated order.
    pub order: Order,
    /// Id of the machine the order goes to.
    pub assigned_machine: String,
}

impl Allocation {
    /// Creates a new allocation.
    pub fn new(order: Order, assigned_machine: impl Into<String>) -> Self {
        Self {
            order,
            assigned_machine: assigned_machine.into(),
        }
    }

    /// Id of the allocated order.
    #[inline]
    pub fn order_id(&self) -> &str {
        &self.order.order_id
    }
}

/// Aggregated load placed on one machine by an allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineLoad {
    /// Machine id.
    pub machine_id: String,
    /// Number of orders assigned.
    pub order_count: usize,
    /// Total quantity assigned.
    pub total_qty: f64,
}

/// Order count and quantity per machine, in first-appearance order.
pub fn load_by_machine(allocations: &[Allocation]) -> Vec<MachineLoad> {
    let mut loads: Vec<MachineLoad> = Vec::new();

    for alloc in allocations {
        match loads
            .iter_mut()
            .find(|l| l.machine_id == alloc.assigned_machine)
        {
            Some(load) => {
                load.order_count += 1;
                load.total_qty += alloc.order.qty;
            }
            None => loads.push(MachineLoad {
                machine_id: alloc.assigned_machine.clone(),
                order_count: 1,
                total_qty: alloc.order.qty,
            }),
        }
    }

    loads
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_accessors() {
        let alloc = Allocation::new(Order::new("OP1", 10.0), "CT01");
        assert_eq!(alloc.order_id(), "OP1");
        assert_eq!(alloc.assigned_machine, "CT01");
    }

    #[test]
    fn test_load_by_machine() {
        let allocations = vec![
            Allocation::new(Order::new("OP1", 10.0), "M2"),
            Allocation::new(Order::new("OP2", 20.0), "M1"),
            Allocation::new(Order::new("OP3", 30.0), "M2"),
        ];

        let loads = load_by_machine(&allocations);
        assert_eq!(loads.len(), 2);
        assert_eq!(loads[0].machine_id, "M2");
        assert_eq!(loads[0].order_count, 2);
        assert!((loads[0].total_qty - 40.0).abs() < 1e-10);
        assert_eq!(loads[1].machine_id, "M1");
        assert_eq!(loads[1].order_count, 1);
    }

    #[test]
    fn test_load_by_machine_empty() {
        assert!(load_by_machine(&[]).is_empty());
    }
}
