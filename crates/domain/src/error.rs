//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during conversion or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A textual value could not be converted into the requested type.
    #[error("unable to convert '{value}' to {target}: {reason}")]
    Conversion {
        /// The text that was being converted.
        value: String,
        /// Display name of the target type.
        target: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// Table text is structurally invalid.
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// The target type cannot be produced from text.
    #[error("unsupported target type: {0}")]
    UnsupportedType(String),
}

impl DomainError {
    /// Creates a conversion error.
    #[must_use]
    pub fn conversion(
        value: impl Into<String>,
        target: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            value: value.into(),
            target: target.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
