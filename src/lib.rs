//! Production planning for manufacturing orders.
//!
//! Ranks machines (work centers) by historical performance, spreads
//! production orders over them, and simulates how each order's real run
//! time drifts from its estimate.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Order`, `Machine`, `ScoredMachine`,
//!   `Allocation`, `SimulationResult`
//! - **`scoring`**: Min-max normalized, weighted machine ranking
//! - **`allocation`**: Round-robin (or top-ranked) order assignment
//! - **`simulation`**: Estimated vs. randomized actual hours, summary metrics
//! - **`pipeline`**: `Planner`, chaining the three stages over one batch
//! - **`ingest`**: CSV ingestion with per-source schema adapters (native, SAP)
//! - **`config`**: TOML-loadable `PlanningConfig`
//! - **`validation`**: Input integrity checks (duplicate IDs, quantities, machine refs)
//!
//! # Architecture
//!
//! Scoring, allocation, and simulation are pure functions over in-memory
//! records: no I/O, no logging, no shared state. Randomness enters only
//! through the `Rng` handed to the simulator. Ingestion and the pipeline
//! sit around that core and do the logging.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use smart_planning::models::{Machine, Order};
//! use smart_planning::pipeline::Planner;
//!
//! let machines = vec![
//!     Machine::new("A").with_oee(0.85).with_speed(100.0).with_reliability(0.90),
//!     Machine::new("B").with_oee(0.92).with_speed(95.0).with_reliability(0.80),
//!     Machine::new("C").with_oee(0.78).with_speed(110.0).with_reliability(0.95),
//! ];
//! let orders = vec![Order::new("OP1", 100.0), Order::new("OP2", 50.0)];
//!
//! let report = Planner::default()
//!     .run(&orders, &machines, &mut StdRng::seed_from_u64(1))
//!     .unwrap();
//! assert_eq!(report.ranking[0].machine_id(), "B");
//! assert_eq!(report.allocations[1].assigned_machine, "C");
//! ```

pub mod allocation;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod scoring;
pub mod simulation;
pub mod validation;

pub use error::{ErrorKind, PlanningError, Result};
