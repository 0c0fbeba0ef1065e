//! Simulation summary metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Mean deviation | Average of per-order deviation percent |
//! | Largest positive deviation | Max deviation (slowest order) |
//! | Largest negative deviation | Min deviation (fastest order) |
//! | Status counts | Orders per Gain / Loss / Neutral |
//! | Total hours | Sum of estimated and of actual hours |
//!
//! Metrics are computed on unrounded results.

use serde::{Deserialize, Serialize};

use crate::models::{SimulationResult, SimulationStatus};

/// Aggregate view of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Number of simulated orders.
    pub order_count: usize,
    /// Mean deviation percent across orders.
    pub mean_deviation_percent: f64,
    /// Largest deviation percent (0.0 when empty).
    pub max_deviation_percent: f64,
    /// Smallest deviation percent (0.0 when empty).
    pub min_deviation_percent: f64,
    /// Orders finishing faster than estimated.
    pub gains: usize,
    /// Orders finishing slower than estimated.
    pub losses: usize,
    /// Orders finishing exactly on estimate.
    pub neutral: usize,
    /// Sum of estimated hours.
    pub total_estimated_hours: f64,
    /// Sum of simulated hours.
    pub total_actual_hours: f64,
    /// Classification of the mean deviation.
    pub overall: SimulationStatus,
}

impl SimulationSummary {
    /// Computes the summary of a set of results.
    pub fn calculate(results: &[SimulationResult]) -> Self {
        let mut summary = Self {
            order_count: results.len(),
            mean_deviation_percent: 0.0,
            max_deviation_percent: 0.0,
            min_deviation_percent: 0.0,
            gains: 0,
            losses: 0,
            neutral: 0,
            total_estimated_hours: 0.0,
            total_actual_hours: 0.0,
            overall: SimulationStatus::Neutral,
        };
        if results.is_empty() {
            return summary;
        }

        let mut total_deviation = 0.0;
        let mut max_dev = f64::NEG_INFINITY;
        let mut min_dev = f64::INFINITY;

        for r in results {
            total_deviation += r.deviation_percent;
            max_dev = max_dev.max(r.deviation_percent);
            min_dev = min_dev.min(r.deviation_percent);
            summary.total_estimated_hours += r.estimated_hours;
            summary.total_actual_hours += r.actual_hours;

            match r.status {
                SimulationStatus::Gain => summary.gains += 1,
                SimulationStatus::Loss => summary.losses += 1,
                SimulationStatus::Neutral => summary.neutral += 1,
            }
        }

        summary.mean_deviation_percent = total_deviation / results.len() as f64;
        summary.max_deviation_percent = max_dev;
        summary.min_deviation_percent = min_dev;
        summary.overall = SimulationStatus::from_deviation(summary.mean_deviation_percent);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(id: &str, estimated: f64, deviation: f64) -> SimulationResult {
        SimulationResult {
            order_id: id.into(),
            machine: "M1".into(),
            qty: estimated * 10.0,
            estimated_hours: estimated,
            actual_hours: estimated * (1.0 + deviation / 100.0),
            deviation_percent: deviation,
            status: SimulationStatus::from_deviation(deviation),
        }
    }

    #[test]
    fn test_summary_basic() {
        let results = vec![
            make_result("OP1", 2.0, 10.0),
            make_result("OP2", 1.0, -15.0),
            make_result("OP3", 4.0, 2.0),
        ];

        let s = SimulationSummary::calculate(&results);
        assert_eq!(s.order_count, 3);
        assert!((s.mean_deviation_percent - (-1.0)).abs() < 1e-10);
        assert!((s.max_deviation_percent - 10.0).abs() < 1e-10);
        assert!((s.min_deviation_percent - (-15.0)).abs() < 1e-10);
        assert_eq!((s.gains, s.losses, s.neutral), (1, 2, 0));
        assert!((s.total_estimated_hours - 7.0).abs() < 1e-10);
        // 2.2 + 0.85 + 4.08
        assert!((s.total_actual_hours - 7.13).abs() < 1e-10);
        assert_eq!(s.overall, SimulationStatus::Gain);
    }

    #[test]
    fn test_summary_all_neutral() {
        let results = vec![make_result("OP1", 1.0, 0.0), make_result("OP2", 3.0, 0.0)];
        let s = SimulationSummary::calculate(&results);
        assert_eq!(s.neutral, 2);
        assert_eq!(s.overall, SimulationStatus::Neutral);
        assert!((s.total_actual_hours - s.total_estimated_hours).abs() < 1e-12);
    }

    #[test]
    fn test_summary_empty() {
        let s = SimulationSummary::calculate(&[]);
        assert_eq!(s.order_count, 0);
        assert_eq!(s.mean_deviation_percent, 0.0);
        assert_eq!(s.max_deviation_percent, 0.0);
        assert_eq!(s.min_deviation_percent, 0.0);
        assert_eq!(s.overall, SimulationStatus::Neutral);
    }
}
