//! Error types for the planning pipeline.
//!
//! Every fatal error carries the identifiers needed to diagnose it
//! (order id, machine id, field name) without re-running the batch.

use serde::Serialize;
use thiserror::Error;

/// Result alias used across the planning core.
pub type Result<T, E = PlanningError> = std::result::Result<T, E>;

/// Fatal errors raised by scoring, allocation, and simulation.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum PlanningError {
    /// A required column is absent from the machine or order input.
    #[error("missing required field '{field}' in {entity} input")]
    MissingField {
        /// Table the field belongs to ("machine" or "order").
        entity: &'static str,
        /// Name of the absent field.
        field: String,
    },

    /// The input cannot be processed (e.g. no machines to allocate against).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A machine that received an order has a zero or negative speed.
    #[error("order '{order_id}': machine '{machine_id}' has non-positive average speed {speed}")]
    InvalidSpeed {
        /// Order being simulated.
        order_id: String,
        /// Machine the order was allocated to.
        machine_id: String,
        /// Offending speed value.
        speed: f64,
    },

    /// An allocation references a machine absent from the master data.
    #[error("order '{order_id}' is allocated to unknown machine '{machine_id}'")]
    Lookup {
        /// Order whose allocation could not be resolved.
        order_id: String,
        /// Unmatched machine id.
        machine_id: String,
    },
}

/// Coarse error taxonomy, for callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required field absent.
    MissingField,
    /// Input rejected (empty machine set, bad speed, bad configuration).
    InvalidInput,
    /// Reference to a machine that does not exist.
    Lookup,
}

impl PlanningError {
    /// Shorthand for [`PlanningError::InvalidInput`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::InvalidInput(_) | Self::InvalidSpeed { .. } => ErrorKind::InvalidInput,
            Self::Lookup { .. } => ErrorKind::Lookup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let missing = PlanningError::MissingField {
            entity: "machine",
            field: "oee_historico".into(),
        };
        assert_eq!(missing.kind(), ErrorKind::MissingField);
        assert_eq!(PlanningError::invalid("x").kind(), ErrorKind::InvalidInput);

        let speed = PlanningError::InvalidSpeed {
            order_id: "OP1".into(),
            machine_id: "CT01".into(),
            speed: 0.0,
        };
        assert_eq!(speed.kind(), ErrorKind::InvalidInput);

        let lookup = PlanningError::Lookup {
            order_id: "OP1".into(),
            machine_id: "CT99".into(),
        };
        assert_eq!(lookup.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn test_messages_carry_context() {
        let err = PlanningError::Lookup {
            order_id: "OP7".into(),
            machine_id: "CT99".into(),
        };
        let message = err.to_string();
        assert!(message.contains("OP7"));
        assert!(message.contains("CT99"));

        let err = PlanningError::MissingField {
            entity: "machine",
            field: "confiabilidade".into(),
        };
        assert!(err.to_string().contains("confiabilidade"));
    }
}
