//! Expression processor port

use tessera_domain::Value;

use crate::error::ExpressionError;

/// A pluggable handler for `#{...}` expressions.
///
/// Processors are queried in their configured order; the first one returning
/// `Some` wins.
pub trait ExpressionProcessor: Send + Sync {
    /// Evaluates the expression text (the content between `#{` and `}`).
    ///
    /// Returns `Ok(None)` if this processor does not recognize the expression.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression is recognized but cannot be evaluated.
    fn execute(&self, expression: &str) -> Result<Option<Value>, ExpressionError>;
}
