//! Table store error types.

use thiserror::Error;

/// Table store operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Table and column metadata could not be resolved at construction
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    /// Table not found in the dataset
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },

    /// Table exists in the dataset but is not declared in the metadata
    #[error("Table '{table}' is not declared in the table metadata")]
    UndeclaredTable { table: String },

    /// Join type other than "single" or "all"
    #[error("Unsupported join type '{join_type}' for table '{table}'")]
    UnsupportedJoinType { table: String, join_type: String },

    /// Dataset value has the wrong shape
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Deserialization(err.to_string())
    }
}
