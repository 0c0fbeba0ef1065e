//! Batch overview metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total orders | Number of orders in the batch |
//! | Total quantity | Sum of order quantities |
//! | Machine count | Number of machines in master data |
//! | Mean OEE | Average historical OEE, in percent |
//!
//! OEE values above 1.0 are already percentages; values in `[0, 1]` are
//! fractions and are scaled by 100. Blank OEE counts as 0.

use serde::{Deserialize, Serialize};

use crate::models::{Machine, Order};

/// Headline numbers of a planning batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOverview {
    /// Number of orders.
    pub total_orders: usize,
    /// Sum of order quantities.
    pub total_qty: f64,
    /// Number of machines.
    pub machine_count: usize,
    /// Mean historical OEE in percent (0.0 without machines).
    pub mean_oee_percent: f64,
}

impl PlanOverview {
    /// Computes the overview of a batch.
    pub fn calculate(orders: &[Order], machines: &[Machine]) -> Self {
        let total_qty = orders.iter().map(|o| o.qty).sum();

        let mean_oee_percent = if machines.is_empty() {
            0.0
        } else {
            let total: f64 = machines
                .iter()
                .map(|m| as_percent(m.indicators().oee))
                .sum();
            total / machines.len() as f64
        };

        Self {
            total_orders: orders.len(),
            total_qty,
            machine_count: machines.len(),
            mean_oee_percent,
        }
    }
}

fn as_percent(value: f64) -> f64 {
    if value > 1.0 {
        value
    } else {
        value * 100.0
    }
}
