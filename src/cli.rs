use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use smart_planning::allocation::AllocationStrategy;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// TOML configuration file (weights, variance bounds, strategy, seed).
    #[clap(long, env = "SMART_PLANNING_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[clap(long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log at debug level (overridden by `RUST_LOG`).
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rank machines by weighted, normalized performance indicators.
    #[clap(name = "score")]
    Score(ScoreArgs),

    /// Rank machines and assign every order to one of them.
    #[clap(name = "allocate")]
    Allocate(AllocateArgs),

    /// Allocate orders and simulate their execution.
    #[clap(name = "simulate")]
    Simulate(SimulateArgs),
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Machine (work center) CSV: native layout or SAP CR05 export.
    #[clap(long, env = "MACHINES_CSV")]
    pub machines: PathBuf,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Order CSV: native layout or SAP COOIS export.
    #[clap(long, env = "ORDERS_CSV")]
    pub orders: PathBuf,

    /// Machine (work center) CSV: native layout or SAP CR05 export.
    #[clap(long, env = "MACHINES_CSV")]
    pub machines: PathBuf,

    /// Allocation strategy, overriding the configuration file.
    #[clap(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Maximum number of order rows to display.
    #[clap(long, default_value = "200")]
    pub limit: usize,
}

#[derive(Parser)]
pub struct AllocateArgs {
    #[clap(flatten)]
    pub batch: BatchArgs,
}

#[derive(Parser)]
pub struct SimulateArgs {
    #[clap(flatten)]
    pub batch: BatchArgs,

    /// Random seed for a reproducible run, overriding the configuration file.
    #[clap(long, env = "SIMULATION_SEED")]
    pub seed: Option<u64>,

    /// Skip orders that cannot be simulated instead of failing.
    #[clap(long)]
    pub best_effort: bool,
}

#[derive(Copy, Clone, ValueEnum)]
pub enum StrategyArg {
    RoundRobin,
    TopRanked,
}

impl From<StrategyArg> for AllocationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::RoundRobin => Self::RoundRobin,
            StrategyArg::TopRanked => Self::TopRanked,
        }
    }
}
