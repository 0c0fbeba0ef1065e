//! Machine table layouts.

use crate::error::PlanningError;
use crate::models::Machine;

use super::error::IngestResult;
use super::table::{cell, parse_number, RawTable};

/// A source layout that can be normalized into [`Machine`]s.
pub trait MachineSchema: Send + Sync {
    /// Layout name, used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Whether the table's columns match this layout.
    fn matches(&self, table: &RawTable) -> bool;

    /// Normalizes every row into a machine.
    fn read(&self, table: &RawTable) -> IngestResult<Vec<Machine>>;
}

/// Planner's own layout: `work_center_sap, descricao, capacidade_teorica,
/// oee_historico, velocidade_media, confiabilidade`.
///
/// The three indicator columns are required; a blank or non-numeric
/// indicator cell is kept as `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeMachines;

impl NativeMachines {
    const REQUIRED: [&'static str; 3] = ["oee_historico", "velocidade_media", "confiabilidade"];
}

impl MachineSchema for NativeMachines {
    fn name(&self) -> &'static str {
        "native work centers (work_center_sap, oee_historico, ...)"
    }

    fn matches(&self, table: &RawTable) -> bool {
        table.has_column("work_center_sap") && table.has_column("oee_historico")
    }

    fn read(&self, table: &RawTable) -> IngestResult<Vec<Machine>> {
        for field in Self::REQUIRED {
            if !table.has_column(field) {
                return Err(PlanningError::MissingField {
                    entity: "machine",
                    field: field.to_string(),
                }
                .into());
            }
        }

        Ok(table
            .rows()
            .iter()
            .map(|row| {
                let number = |column: &str| cell(row, column).and_then(parse_number);
                Machine {
                    machine_id: cell(row, "work_center_sap").unwrap_or_default().to_string(),
                    description: cell(row, "descricao").unwrap_or_default().to_string(),
                    theoretical_capacity: number("capacidade_teorica"),
                    historical_oee: number("oee_historico"),
                    average_speed: number("velocidade_media"),
                    reliability: number("confiabilidade"),
                }
            })
            .collect())
    }
}

/// SAP capacity/resource export (transaction CR05), Portuguese headers.
///
/// The export has no performance history, so every machine gets the
/// same placeholder indicators.
#[derive(Debug, Clone, Copy)]
pub struct Cr05Machines {
    /// OEE assigned to every resource.
    pub default_oee: f64,
    /// Average speed assigned to every resource.
    pub default_speed: f64,
    /// Reliability assigned to every resource.
    pub default_reliability: f64,
    /// Capacity used when utilization is absent or non-numeric.
    pub default_capacity: f64,
}

impl Default for Cr05Machines {
    fn default() -> Self {
        Self {
            default_oee: 0.85,
            default_speed: 100.0,
            default_reliability: 0.90,
            default_capacity: 100.0,
        }
    }
}

impl MachineSchema for Cr05Machines {
    fn name(&self) -> &'static str {
        "SAP CR05 resources (Recurso, ...)"
    }

    fn matches(&self, table: &RawTable) -> bool {
        table.has_column("Recurso")
    }

    fn read(&self, table: &RawTable) -> IngestResult<Vec<Machine>> {
        Ok(table
            .rows()
            .iter()
            .map(|row| Machine {
                machine_id: cell(row, "Recurso").unwrap_or_default().to_string(),
                description: cell(row, "Descrição breve").unwrap_or_default().to_string(),
                theoretical_capacity: Some(
                    cell(row, "Grau utilização em %")
                        .and_then(parse_number)
                        .unwrap_or(self.default_capacity),
                ),
                historical_oee: Some(self.default_oee),
                average_speed: Some(self.default_speed),
                reliability: Some(self.default_reliability),
            })
            .collect())
    }
}
