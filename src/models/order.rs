//! Production order model.
//!
//! An order is one row of the normalized order table delivered by
//! ingestion. The pipeline reads it but never changes it; allocation
//! and simulation wrap it instead.

use serde::{Deserialize, Serialize};

/// A production order to be placed on a machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub order_id: String,
    /// Material number.
    pub material: String,
    /// Material short text.
    pub material_description: String,
    /// Order quantity (units). Non-negative.
    pub qty: f64,
    /// Work center proposed by the source system. Informational only;
    /// allocation ignores it.
    pub work_center_hint: Option<String>,
    /// MRP controller responsible for the order.
    pub mrp_controller: String,
    /// Due date as delivered by the source system.
    pub due_date: Option<String>,
}

impl Order {
    /// Creates an order with the given id and quantity.
    pub fn new(order_id: impl Into<String>, qty: f64) -> Self {
        Self {
            order_id: order_id.into(),
            material: String::new(),
            material_description: String::new(),
            qty,
            work_center_hint: None,
            mrp_controller: String::new(),
            due_date: None,
        }
    }

    /// Sets the material number and its description.
    pub fn with_material(
        mut self,
        material: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.material = material.into();
        self.material_description = description.into();
        self
    }

    /// Sets the work center hint.
    pub fn with_work_center_hint(mut self, work_center: impl Into<String>) -> Self {
        self.work_center_hint = Some(work_center.into());
        self
    }

    /// Sets the MRP controller.
    pub fn with_mrp_controller(mut self, controller: impl Into<String>) -> Self {
        self.mrp_controller = controller.into();
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}
