use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// A configuration value is empty, out of range or contradicts another one.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
    #[error("row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

impl ModelError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
