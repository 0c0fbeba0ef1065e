//! Order table layouts.

use std::collections::HashMap;

use tracing::warn;

use super::error::IngestResult;
use super::table::{cell, parse_number, RawTable};
use crate::models::Order;

/// A source layout that can be normalized into [`Order`]s.
pub trait OrderSchema: Send + Sync {
    /// Layout name, used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Whether the table's columns match this layout.
    fn matches(&self, table: &RawTable) -> bool;

    /// Normalizes every row into an order.
    fn read(&self, table: &RawTable) -> IngestResult<Vec<Order>>;
}

/// Planner's own layout: `order_id, material, material_desc, qty,
/// work_center_sap, mrp_controller, due_date`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeOrders;

impl OrderSchema for NativeOrders {
    fn name(&self) -> &'static str {
        "native orders (order_id, qty, ...)"
    }

    fn matches(&self, table: &RawTable) -> bool {
        table.has_column("order_id") && table.has_column("qty")
    }

    fn read(&self, table: &RawTable) -> IngestResult<Vec<Order>> {
        Ok(table
            .rows()
            .iter()
            .map(|row| Order {
                order_id: text(row, "order_id"),
                material: text(row, "material"),
                material_description: text(row, "material_desc"),
                qty: quantity(row, "qty"),
                work_center_hint: cell(row, "work_center_sap").map(str::to_string),
                mrp_controller: text(row, "mrp_controller"),
                due_date: cell(row, "due_date").map(str::to_string),
            })
            .collect())
    }
}

/// SAP order information system export (transaction COOIS), Portuguese headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CooisOrders;

impl CooisOrders {
    const WORK_CENTER_COLUMNS: [&'static str; 3] =
        ["Centro de trabalho", "Ctro Trabalho", "Ctro.trab."];
    const DUE_DATE_COLUMNS: [&'static str; 2] =
        ["Data conclusão (prog.)", "Data de conclusão base"];
}

impl OrderSchema for CooisOrders {
    fn name(&self) -> &'static str {
        "SAP COOIS export (Ordem, ...)"
    }

    fn matches(&self, table: &RawTable) -> bool {
        table.has_column("Ordem")
    }

    fn read(&self, table: &RawTable) -> IngestResult<Vec<Order>> {
        let work_center = table.first_column(&Self::WORK_CENTER_COLUMNS);
        let due_date = table.first_column(&Self::DUE_DATE_COLUMNS);

        Ok(table
            .rows()
            .iter()
            .map(|row| Order {
                order_id: text(row, "Ordem"),
                material: text(row, "Material"),
                material_description: text(row, "Texto breve material"),
                qty: quantity(row, "Quantidade da ordem (GMEIN)"),
                work_center_hint: work_center
                    .and_then(|col| cell(row, col))
                    .map(str::to_string),
                mrp_controller: text(row, "Planejador MRP"),
                due_date: due_date.and_then(|col| cell(row, col)).map(str::to_string),
            })
            .collect())
    }
}

fn text(row: &HashMap<String, String>, column: &str) -> String {
    cell(row, column).unwrap_or_default().to_string()
}

/// Quantity cell; blank or non-numeric reads as `0.0`.
fn quantity(row: &HashMap<String, String>, column: &str) -> f64 {
    match cell(row, column) {
        None => 0.0,
        Some(raw) => parse_number(raw).unwrap_or_else(|| {
            warn!(column, value = raw, "non-numeric quantity, using 0");
            0.0
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_orders() {
        let table = RawTable::from_bytes(
            b"order_id,material,material_desc,qty,work_center_sap,mrp_controller,due_date\n\
              OP1,M-1,Housing,120,CT01,P01,2025-03-01\n\
              OP2,M-2,Cover,abc,,P02,\n",
        )
        .unwrap();

        assert!(NativeOrders.matches(&table));
        assert!(!CooisOrders.matches(&table));

        let orders = NativeOrders.read(&table).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id, "OP1");
        assert_eq!(orders[0].material_description, "Housing");
        assert!((orders[0].qty - 120.0).abs() < 1e-10);
        assert_eq!(orders[0].work_center_hint.as_deref(), Some("CT01"));
        assert_eq!(orders[0].due_date.as_deref(), Some("2025-03-01"));

        // Non-numeric quantity coerced, blank optionals stay None
        assert_eq!(orders[1].qty, 0.0);
        assert!(orders[1].work_center_hint.is_none());
        assert!(orders[1].due_date.is_none());
    }

    #[test]
    fn test_coois_orders() {
        let csv = "Ordem;Material;Texto breve material;Quantidade da ordem (GMEIN);Ctro.trab.;Planejador MRP;Data de conclusão base\n\
                   1000123;MAT-9;Volante;1.250,5;WC-7;A01;15.03.2025\n";
        let table = RawTable::from_bytes(csv.as_bytes()).unwrap();
        assert!(CooisOrders.matches(&table));
        assert!(!NativeOrders.matches(&table));

        let orders = CooisOrders.read(&table).unwrap();
        assert_eq!(orders.len(), 1);
        let o = &orders[0];
        assert_eq!(o.order_id, "1000123");
        assert_eq!(o.material, "MAT-9");
        assert_eq!(o.material_description, "Volante");
        assert!((o.qty - 1250.5).abs() < 1e-10);
        assert_eq!(o.work_center_hint.as_deref(), Some("WC-7"));
        assert_eq!(o.mrp_controller, "A01");
        assert_eq!(o.due_date.as_deref(), Some("15.03.2025"));
    }

    #[test]
    fn test_coois_scheduled_date_preferred() {
        let csv = "Ordem;Data conclusão (prog.);Data de conclusão base\n1;01.04.2025;15.03.2025\n";
        let table = RawTable::from_bytes(csv.as_bytes()).unwrap();
        let orders = CooisOrders.read(&table).unwrap();
        assert_eq!(orders[0].due_date.as_deref(), Some("01.04.2025"));
        // Missing optional columns fall back to defaults
        assert_eq!(orders[0].qty, 0.0);
        assert!(orders[0].work_center_hint.is_none());
    }
}
