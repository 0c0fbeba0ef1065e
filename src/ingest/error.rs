//! Ingestion error types.

use thiserror::Error;

use crate::error::PlanningError;

/// Errors raised while reading and normalizing source tables.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The source could not be read.
    #[error("failed to read {source_name}: {error}")]
    Io {
        /// File name or other label of the source.
        source_name: String,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The CSV content could not be parsed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// No registered schema adapter recognizes the table's columns.
    #[error("unrecognized {entity} layout; expected one of: {expected}")]
    UnrecognizedLayout {
        /// "order" or "machine".
        entity: &'static str,
        /// Names of the registered layouts.
        expected: String,
    },

    /// A recognized layout lacks a required column.
    #[error(transparent)]
    Planning(#[from] PlanningError),
}

/// Result alias for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;
