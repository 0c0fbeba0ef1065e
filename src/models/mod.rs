//! Planning domain models.
//!
//! Record shapes exchanged between ingestion, the three pipeline stages,
//! and presentation.
//!
//! | Type | Produced by | Consumed by |
//! |------|-------------|-------------|
//! | `Order` | ingestion | allocation |
//! | `Machine` | ingestion | scoring, simulation |
//! | `ScoredMachine` | scoring | allocation |
//! | `Allocation` | allocation | simulation |
//! | `SimulationResult` | simulation | reporting |

mod allocation;
mod machine;
mod order;
mod simulation;

pub use allocation::{load_by_machine, Allocation, MachineLoad, ScoredMachine};
pub use machine::{Indicators, Machine};
pub use order::Order;
pub use simulation::{SimulationResult, SimulationStatus};
