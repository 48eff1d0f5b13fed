//! Error types for the simulation pipeline
//!
//! Every failure is fatal: the pipeline is pure and deterministic, so an error
//! reproduces identically on retry and is propagated straight to the caller.

use thiserror::Error;

/// Errors raised while loading reference data, simulating, or exporting
#[derive(Debug, Error)]
pub enum SimError {
    /// Malformed reference table or invalid simulation parameters
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A code is absent from its (closed) reference table
    #[error("unknown {table} code '{code}'")]
    Lookup { table: &'static str, code: String },

    /// A derived numeric field is negative or non-finite
    #[error("practice {practice_id}: {field} is out of domain ({value})")]
    NumericDomain {
        practice_id: u32,
        field: &'static str,
        value: f64,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SimError::Configuration(msg.into())
    }

    pub(crate) fn lookup(table: &'static str, code: &str) -> Self {
        SimError::Lookup {
            table,
            code: code.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
