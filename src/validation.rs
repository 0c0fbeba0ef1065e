//! Input validation for planning batches.
//!
//! Checks structural integrity of orders and machines before the
//! pipeline runs. Detects:
//! - Duplicate order or machine IDs
//! - Empty IDs
//! - Negative or non-finite order quantities
//!
//! and, once orders are allocated:
//! - References to unknown machines
//! - Machines receiving orders without a positive average speed
//!
//! Every problem is reported, not just the first.

use std::collections::{HashMap, HashSet};

use crate::models::{Allocation, Machine, Order};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An order or machine has an empty ID.
    EmptyId,
    /// An order quantity is negative or not a number.
    InvalidQuantity,
    /// An allocation references a machine that doesn't exist.
    InvalidMachineReference,
    /// A machine's average speed is missing, zero, or negative.
    NonPositiveSpeed,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the orders and machines of a planning batch.
///
/// Checks:
/// 1. No empty or duplicate machine IDs
/// 2. No empty or duplicate order IDs
/// 3. All quantities finite and non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(orders: &[Order], machines: &[Machine]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut machine_ids = HashSet::new();
    for m in machines {
        if m.machine_id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Machine with empty ID",
            ));
        } else if !machine_ids.insert(m.machine_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate machine ID: {}", m.machine_id),
            ));
        }
    }

    let mut order_ids = HashSet::new();
    for o in orders {
        if o.order_id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Order with empty ID",
            ));
        } else if !order_ids.insert(o.order_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate order ID: {}", o.order_id),
            ));
        }

        if !o.qty.is_finite() || o.qty < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuantity,
                format!("Order '{}' has invalid quantity {}", o.order_id, o.qty),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates allocations against machine master data.
///
/// Checks:
/// 1. Every assigned machine exists
/// 2. Every machine that receives an order has a positive average speed
///    (reported once per machine)
pub fn validate_allocations(allocations: &[Allocation], machines: &[Machine]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut by_id: HashMap<&str, &Machine> = HashMap::new();
    for m in machines {
        by_id.entry(m.machine_id.as_str()).or_insert(m);
    }

    let mut reported = HashSet::new();
    for alloc in allocations {
        match by_id.get(alloc.assigned_machine.as_str()) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidMachineReference,
                format!(
                    "Order '{}' references unknown machine '{}'",
                    alloc.order_id(), alloc.assigned_machine
                ),
            )),
            Some(m) if m.speed() <= 0.0 && reported.insert(m.machine_id.as_str()) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonPositiveSpeed,
                    format!(
                        "Machine '{}' receives orders but has no positive average speed ({:?})",
                        m.machine_id, m.average_speed
                    ),
                ));
            }
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
