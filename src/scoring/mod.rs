//! Machine scoring.
//!
//! Turns raw machine indicators into a comparable score and ranks the
//! machines by it.
//!
//! # Algorithm
//!
//! 1. Read OEE, speed, and reliability; blank or non-numeric cells are `0.0`.
//! 2. Min-max normalize each indicator independently to `[0, 1]`.
//!    An indicator with no spread (max == min) normalizes to `1.0` for
//!    every machine.
//! 3. `score = w_oee * oee_norm + w_speed * speed_norm + w_rel * rel_norm`
//! 4. Stable sort by descending score; ties keep input order.
//!
//! # Usage
//!
//! ```
//! use smart_planning::models::Machine;
//! use smart_planning::scoring::MachineScorer;
//!
//! let machines = vec![
//!     Machine::new("CT01").with_oee(0.85).with_speed(100.0).with_reliability(0.90),
//!     Machine::new("CT02").with_oee(0.92).with_speed(95.0).with_reliability(0.80),
//! ];
//! let ranked = MachineScorer::default().score(&machines);
//! assert_eq!(ranked[0].rank, 1);
//! ```

mod weights;

pub use weights::ScoringWeights;

use crate::models::{Machine, ScoredMachine};

/// Ranks machines by a weighted sum of normalized indicators.
#[derive(Debug, Clone, Default)]
pub struct MachineScorer {
    weights: ScoringWeights,
}

impl MachineScorer {
    /// Creates a scorer with the given weights.
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Weights in use.
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Scores and ranks machines, best first.
    ///
    /// The output holds exactly the input machines, reordered. An empty
    /// input yields an empty ranking.
    pub fn score(&self, machines: &[Machine]) -> Vec<ScoredMachine> {
        let indicators: Vec<_> = machines.iter().map(Machine::indicators).collect();

        let oee = min_max(indicators.iter().map(|i| i.oee));
        let speed = min_max(indicators.iter().map(|i| i.speed));
        let reliability = min_max(indicators.iter().map(|i| i.reliability));

        let mut scored: Vec<ScoredMachine> = machines
            .iter()
            .enumerate()
            .map(|(i, machine)| ScoredMachine {
                machine: machine.clone(),
                score: self.weights.oee * oee[i]
                    + self.weights.speed * speed[i]
                    + self.weights.reliability * reliability[i],
                rank: 0,
            })
            .collect();

        // sort_by is stable: equal scores keep input order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        for (pos, sm) in scored.iter_mut().enumerate() {
            sm.rank = pos + 1;
        }

        scored
    }
}

/// Min-max normalization to `[0, 1]`; no spread maps everything to `1.0`.
fn min_max(values: impl Iterator<Item = f64> + Clone) -> Vec<f64> {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 || !range.is_finite() {
        return values.map(|_| 1.0).collect();
    }
    values.map(|v| (v - min) / range).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_machines() -> Vec<Machine> {
        vec![
            Machine::new("A").with_oee(0.85).with_speed(100.0).with_reliability(0.90),
            Machine::new("B").with_oee(0.92).with_speed(95.0).with_reliability(0.80),
            Machine::new("C").with_oee(0.78).with_speed(110.0).with_reliability(0.95),
        ]
    }

    fn ids(ranked: &[ScoredMachine]) -> Vec<&str> {
        ranked.iter().map(|s| s.machine_id()).collect()
    }

    #[test]
    fn test_reference_ranking() {
        let ranked = MachineScorer::default().score(&sample_machines());

        // B: 0.5*1 + 0.3*0 + 0.2*0        = 0.5
        // C: 0.5*0 + 0.3*1 + 0.2*1        = 0.5 (tie, B first by input order)
        // A: 0.5*0.5 + 0.3*(1/3) + 0.2*(2/3) = 0.48333...
        assert_eq!(ids(&ranked), vec!["B", "C", "A"]);
        assert!((ranked[0].score - 0.5).abs() < 1e-9);
        assert!((ranked[1].score - 0.5).abs() < 1e-9);
        assert!((ranked[2].score - (0.25 + 0.1 + 0.2 * 2.0 / 3.0)).abs() < 1e-9);
        assert_eq!(
            ranked.iter().map(|s| s.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_output_is_permutation() {
        let machines = sample_machines();
        let ranked = MachineScorer::default().score(&machines);

        let mut input: Vec<_> = machines.iter().map(|m| m.machine_id.as_str()).collect();
        let mut output = ids(&ranked);
        input.sort_unstable();
        output.sort_unstable();
        assert_eq!(input, output);

        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for sm in &ranked {
            assert!(sm.score >= 0.0 && sm.score <= 1.0 + 1e-12);
            // Master data untouched
            assert!(machines.contains(&sm.machine));
        }
    }

    #[test]
    fn test_degenerate_indicator_normalizes_to_one() {
        // Identical OEE everywhere: every machine gets the full OEE weight.
        let machines = vec![
            Machine::new("M1").with_oee(0.8).with_speed(50.0).with_reliability(0.9),
            Machine::new("M2").with_oee(0.8).with_speed(100.0).with_reliability(0.9),
        ];
        let ranked = MachineScorer::default().score(&machines);

        assert_eq!(ids(&ranked), vec!["M2", "M1"]);
        // M2: 0.5 + 0.3 + 0.2, M1: 0.5 + 0 + 0.2
        assert!((ranked[0].score - 1.0).abs() < 1e-10);
        assert!((ranked[1].score - 0.7).abs() < 1e-10);
    }

    #[test]
    fn test_single_machine_gets_weight_sum() {
        let machines = vec![Machine::new("ONLY").with_oee(0.5).with_speed(10.0)];
        let ranked = MachineScorer::new(ScoringWeights::new(0.6, 0.3, 0.1)).score(&machines);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].score - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_blank_indicator_reads_as_zero() {
        let machines = vec![
            Machine::new("BLANK").with_speed(100.0).with_reliability(0.9),
            Machine::new("FULL").with_oee(0.9).with_speed(100.0).with_reliability(0.9),
        ];
        let ranked = MachineScorer::default().score(&machines);
        assert_eq!(ids(&ranked), vec!["FULL", "BLANK"]);
        assert!((ranked[1].score - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_empty_input() {
        assert!(MachineScorer::default().score(&[]).is_empty());
    }

    #[test]
    fn test_rescoring_is_stable() {
        let scorer = MachineScorer::default();
        let first = scorer.score(&sample_machines());
        let again_input: Vec<Machine> = first.iter().map(|s| s.machine.clone()).collect();
        let second = scorer.score(&again_input);

        assert_eq!(ids(&first), ids(&second));
        for (a, b) in first.iter().zip(&second) {
            assert!((a.score - b.score).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let machines = vec![
            Machine::new("X").with_oee(0.9).with_speed(1.0).with_reliability(0.9),
            Machine::new("Y").with_oee(0.9).with_speed(1.0).with_reliability(0.9),
            Machine::new("Z").with_oee(0.9).with_speed(1.0).with_reliability(0.9),
        ];
        let ranked = MachineScorer::default().score(&machines);
        assert_eq!(ids(&ranked), vec!["X", "Y", "Z"]);
    }
}
