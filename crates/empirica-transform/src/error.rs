//! Error types for the preprocessing pipeline.

use empirica_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// The configuration is empty or contradictory.
    #[error("invalid preprocessing configuration: {0}")]
    InvalidConfig(String),

    // ============================================================================
    // Table Errors
    // ============================================================================
    /// A variable names a column that the table does not have.
    #[error("column not found in table: {column}")]
    UnknownColumn { column: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl TransformError {
    /// Lift a model error, keeping configuration and column failures in
    /// their own variants.
    pub fn from_model(err: ModelError) -> Self {
        match err {
            ModelError::InvalidConfig(message) => Self::InvalidConfig(message),
            ModelError::UnknownColumn(column) => Self::UnknownColumn { column },
            other => Self::Model(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
