use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use smart_planning::{
    models::{Allocation, MachineLoad, ScoredMachine, SimulationResult, SimulationStatus},
    pipeline::PlanOverview,
    simulation::SimulationSummary,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn number(value: impl std::fmt::Display) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

fn indicator(value: Option<f64>) -> Cell {
    match value {
        Some(value) => number(value),
        None => Cell::new("-").set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
    }
}

fn status_color(status: SimulationStatus) -> Color {
    match status {
        SimulationStatus::Gain => Color::Green,
        SimulationStatus::Loss => Color::Red,
        SimulationStatus::Neutral => Color::Reset,
    }
}

pub fn build_ranking_table(ranking: &[ScoredMachine]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Rank", "Machine", "Description", "OEE", "Speed", "Reliability", "Score"]);
    for scored in ranking {
        let machine = &scored.machine;
        table.add_row(vec![
            number(scored.rank),
            Cell::new(&machine.machine_id).add_attribute(Attribute::Bold),
            Cell::new(&machine.description),
            indicator(machine.historical_oee),
            indicator(machine.average_speed),
            indicator(machine.reliability),
            number(format!("{:.4}", scored.score)),
        ]);
    }
    table
}

pub fn build_overview_table(overview: &PlanOverview) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Orders", "Total quantity", "Machines", "Mean OEE"]);
    table.add_row(vec![
        number(overview.total_orders),
        number(format!("{:.2}", overview.total_qty)),
        number(overview.machine_count),
        number(format!("{:.1}%", overview.mean_oee_percent)),
    ]);
    table
}

pub fn build_loads_table(loads: &[MachineLoad]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Machine", "Orders", "Quantity"]);
    for load in loads {
        table.add_row(vec![
            Cell::new(&load.machine_id),
            number(load.order_count),
            number(format!("{:.2}", load.total_qty)),
        ]);
    }
    table
}

pub fn build_allocations_table(allocations: &[Allocation], limit: usize) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Order", "Material", "Description", "Quantity", "Due", "Machine"]);
    for alloc in allocations.iter().take(limit) {
        let order = &alloc.order;
        table.add_row(vec![
            Cell::new(&order.order_id),
            Cell::new(&order.material),
            Cell::new(&order.material_description),
            number(order.qty),
            Cell::new(order.due_date.as_deref().unwrap_or("-")),
            Cell::new(&alloc.assigned_machine).add_attribute(Attribute::Bold),
        ]);
    }
    table
}

/// Per-order results at display precision.
pub fn build_simulation_table(results: &[SimulationResult], limit: usize) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Order",
        "Machine",
        "Quantity",
        "Estimated (h)",
        "Actual (h)",
        "Deviation",
        "Status",
    ]);
    for result in results.iter().take(limit).map(SimulationResult::rounded) {
        let color = status_color(result.status);
        table.add_row(vec![
            Cell::new(&result.order_id),
            Cell::new(&result.machine),
            number(result.qty),
            number(format!("{:.2}", result.estimated_hours)),
            number(format!("{:.2}", result.actual_hours)),
            number(format!("{:+.1}%", result.deviation_percent)).fg(color),
            Cell::new(result.status).fg(color),
        ]);
    }
    table
}

pub fn build_summary_table(summary: &SimulationSummary) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Orders",
        "Estimated (h)",
        "Actual (h)",
        "Mean deviation",
        "Min",
        "Max",
        "Gain",
        "Loss",
        "Neutral",
    ]);
    table.add_row(vec![
        number(summary.order_count),
        number(format!("{:.2}", summary.total_estimated_hours)),
        number(format!("{:.2}", summary.total_actual_hours)),
        number(format!("{:+.1}%", summary.mean_deviation_percent)).fg(status_color(summary.overall)),
        number(format!("{:+.1}%", summary.min_deviation_percent)),
        number(format!("{:+.1}%", summary.max_deviation_percent)),
        number(summary.gains).fg(Color::Green),
        number(summary.losses).fg(Color::Red),
        number(summary.neutral),
    ]);
    table
}

/// Note to print under a table cut to `limit` rows.
pub fn truncation_note(total: usize, limit: usize) -> Option<String> {
    (total > limit).then(|| format!("Showing {limit} of {total} orders."))
}
