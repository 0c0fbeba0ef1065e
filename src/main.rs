mod cli;
mod tables;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use smart_planning::{
    config::PlanningConfig,
    ingest::SchemaRegistry,
    logging,
    models::{Machine, Order},
    pipeline::Planner,
    scoring::MachineScorer,
    validation::validate_allocations,
};
use tracing::{info, warn};

use crate::cli::{AllocateArgs, Args, BatchArgs, Command, OutputFormat, ScoreArgs, SimulateArgs};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(if args.verbose { "debug" } else { "info" });

    let config = match &args.config {
        Some(path) => PlanningConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => PlanningConfig::default(),
    };

    match args.command {
        Command::Score(cmd) => score(config, &cmd, args.format),
        Command::Allocate(cmd) => allocate(config, &cmd, args.format),
        Command::Simulate(cmd) => simulate(config, &cmd, args.format),
    }
}

fn score(config: PlanningConfig, args: &ScoreArgs, format: OutputFormat) -> Result<()> {
    let machines = load_machines(&SchemaRegistry::default(), &args.machines)?;
    let ranking = MachineScorer::new(config.scoring).score(&machines);
    info!(machines = ranking.len(), "machines ranked");

    match format {
        OutputFormat::Json => print_json(&ranking),
        OutputFormat::Table => {
            println!("{}", tables::build_ranking_table(&ranking));
            Ok(())
        }
    }
}

fn allocate(config: PlanningConfig, args: &AllocateArgs, format: OutputFormat) -> Result<()> {
    let config = config.with_overrides(args.batch.strategy.map(Into::into), None);
    let (orders, machines) = load_batch(&args.batch)?;

    let plan = Planner::new(config).plan(&orders, &machines).context("failed to plan")?;
    if let Err(problems) = validate_allocations(&plan.allocations, &machines) {
        for problem in &problems {
            warn!(%problem, "allocation will not simulate");
        }
    }

    match format {
        OutputFormat::Json => print_json(&plan),
        OutputFormat::Table => {
            println!("{}", tables::build_overview_table(&plan.overview));
            println!("{}", tables::build_loads_table(&plan.loads));
            println!("{}", tables::build_allocations_table(&plan.allocations, args.batch.limit));
            if let Some(note) = tables::truncation_note(plan.allocations.len(), args.batch.limit) {
                println!("{note}");
            }
            Ok(())
        }
    }
}

fn simulate(config: PlanningConfig, args: &SimulateArgs, format: OutputFormat) -> Result<()> {
    let config = config.with_overrides(args.batch.strategy.map(Into::into), args.seed);
    let (orders, machines) = load_batch(&args.batch)?;

    let mut rng = config.simulation.rng();
    let planner = Planner::new(config);
    let report = if args.best_effort {
        planner.run_best_effort(&orders, &machines, &mut rng)
    } else {
        planner.run(&orders, &machines, &mut rng)
    }
    .context("simulation failed")?;

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            println!("{}", tables::build_overview_table(&report.overview));
            println!("{}", tables::build_summary_table(&report.summary));
            println!("{}", tables::build_simulation_table(&report.simulation, args.batch.limit));
            if let Some(note) = tables::truncation_note(report.simulation.len(), args.batch.limit) {
                println!("{note}");
            }
            if !report.failures.is_empty() {
                println!("Skipped {} orders that could not be simulated.", report.failures.len());
            }
            Ok(())
        }
    }
}

fn load_batch(args: &BatchArgs) -> Result<(Vec<Order>, Vec<Machine>)> {
    let registry = SchemaRegistry::default();
    let orders = registry
        .load_orders(&args.orders)
        .with_context(|| format!("failed to load orders from {}", args.orders.display()))?;
    let machines = load_machines(&registry, &args.machines)?;
    Ok((orders, machines))
}

fn load_machines(registry: &SchemaRegistry, path: &Path) -> Result<Vec<Machine>> {
    registry
        .load_machines(path)
        .with_context(|| format!("failed to load machines from {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("failed to serialize output")?);
    Ok(())
}
