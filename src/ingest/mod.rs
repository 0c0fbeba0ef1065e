//! Source table ingestion.
//!
//! Normalizes exported order and machine tables into [`Order`] and
//! [`Machine`] records. Each known source layout is a schema adapter;
//! [`SchemaRegistry`] picks the first adapter whose columns match.
//!
//! | Adapter | Entity | Recognized by |
//! |---------|--------|---------------|
//! | `NativeOrders` | order | `order_id` + `qty` |
//! | `CooisOrders` | order | `Ordem` |
//! | `NativeMachines` | machine | `work_center_sap` + `oee_historico` |
//! | `Cr05Machines` | machine | `Recurso` |
//!
//! New layouts are supported by registering another adapter.
//!
//! [`Order`]: crate::models::Order
//! [`Machine`]: crate::models::Machine

mod error;
mod machines;
mod orders;
mod table;

pub use error::{IngestError, IngestResult};
pub use machines::{Cr05Machines, MachineSchema, NativeMachines};
pub use orders::{CooisOrders, NativeOrders, OrderSchema};
pub use table::{cell, parse_number, RawTable};

use std::path::Path;

use tracing::{debug, info};

use crate::models::{Machine, Order};

/// Ordered set of schema adapters.
pub struct SchemaRegistry {
    order_schemas: Vec<Box<dyn OrderSchema>>,
    machine_schemas: Vec<Box<dyn MachineSchema>>,
}

impl SchemaRegistry {
    /// Creates a registry without adapters.
    pub fn empty() -> Self {
        Self {
            order_schemas: Vec::new(),
            machine_schemas: Vec::new(),
        }
    }

    /// Registers an order layout (tried after those already registered).
    pub fn with_order_schema<S: OrderSchema + 'static>(mut self, schema: S) -> Self {
        self.order_schemas.push(Box::new(schema));
        self
    }

    /// Registers a machine layout (tried after those already registered).
    pub fn with_machine_schema<S: MachineSchema + 'static>(mut self, schema: S) -> Self {
        self.machine_schemas.push(Box::new(schema));
        self
    }

    /// Normalizes an order table with the first matching layout.
    pub fn read_orders(&self, table: &RawTable) -> IngestResult<Vec<Order>> {
        let schema = self
            .order_schemas
            .iter()
            .find(|s| s.matches(table))
            .ok_or_else(|| IngestError::UnrecognizedLayout {
                entity: "order",
                expected: join_names(self.order_schemas.iter().map(|s| s.name())),
            })?;

        debug!(layout = schema.name(), rows = table.len(), "order layout detected");
        schema.read(table)
    }

    /// Normalizes a machine table with the first matching layout.
    pub fn read_machines(&self, table: &RawTable) -> IngestResult<Vec<Machine>> {
        let schema = self
            .machine_schemas
            .iter()
            .find(|s| s.matches(table))
            .ok_or_else(|| IngestError::UnrecognizedLayout {
                entity: "machine",
                expected: join_names(self.machine_schemas.iter().map(|s| s.name())),
            })?;

        debug!(layout = schema.name(), rows = table.len(), "machine layout detected");
        schema.read(table)
    }

    /// Reads and normalizes an order CSV file.
    pub fn load_orders(&self, path: impl AsRef<Path>) -> IngestResult<Vec<Order>> {
        let path = path.as_ref();
        let orders = self.read_orders(&RawTable::from_path(path)?)?;
        info!(path = %path.display(), count = orders.len(), "orders loaded");
        Ok(orders)
    }

    /// Reads and normalizes a machine CSV file.
    pub fn load_machines(&self, path: impl AsRef<Path>) -> IngestResult<Vec<Machine>> {
        let path = path.as_ref();
        let machines = self.read_machines(&RawTable::from_path(path)?)?;
        info!(path = %path.display(), count = machines.len(), "machines loaded");
        Ok(machines)
    }
}

impl Default for SchemaRegistry {
    /// Native layouts first, then the SAP exports.
    fn default() -> Self {
        Self::empty()
            .with_order_schema(NativeOrders)
            .with_order_schema(CooisOrders)
            .with_machine_schema(NativeMachines)
            .with_machine_schema(Cr05Machines::default())
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field(
                "order_schemas",
                &self.order_schemas.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field(
                "machine_schemas",
                &self.machine_schemas.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join("; ")
}
