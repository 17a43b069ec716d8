//! Unified error type definition

use thiserror::Error;

pub use hostname_connector_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// No table registered under this name
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// A get was issued without an equality qualifier on a key column
    #[error("Missing required key column: {0}")]
    MissingKeyColumn(String),

    /// A row could not be converted to column values
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// API error, passed through unchanged
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (bad input, resource does not exist, etc.),
    /// used for log levels.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::TableNotFound(_) | Self::MissingKeyColumn(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::SerializationError(_) => false,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
